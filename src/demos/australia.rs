use std::collections::HashMap;

use crate::csp::{different, Assignment, Csp, Variable};

/// The classic seven-region Australian map-coloring CSP: three colors,
/// `different` across every shared border.
pub fn create_australia_csp() -> Csp<String> {
    let mut csp = Csp::new();
    let colors = ["red", "green", "blue"].map(str::to_string);

    let regions = ["WA", "NT", "SA", "Q", "NSW", "V", "T"];
    let ids: HashMap<&str, _> = regions
        .iter()
        .map(|&name| {
            let var = Variable::new(name, colors.clone());
            let id = var.id();
            csp.add_variable(var);
            (name, id)
        })
        .collect();

    let borders = [
        ("WA", "NT"),
        ("WA", "SA"),
        ("NT", "SA"),
        ("NT", "Q"),
        ("SA", "Q"),
        ("SA", "NSW"),
        ("SA", "V"),
        ("Q", "NSW"),
        ("NSW", "V"),
    ];
    for (a, b) in borders {
        let name = format!("{a}-{b}");
        csp.add_binary_constraint(ids[a], different(name), ids[b], false).unwrap();
    }
    // Tasmania is an island: no borders, no constraints.

    csp
}

pub fn print_australia_map(csp: &Csp<String>, assignment: Option<&Assignment<String>>) {
    let mut map = vec![
        "                      +------+    ".to_string(),
        "                      |  Q   |    ".to_string(),
        "    +------+------+---+      |    ".to_string(),
        "    |      |      |   |      |    ".to_string(),
        "    |  WA  |  NT  | SA+------+    ".to_string(),
        "    |      |      |   |      |    ".to_string(),
        "    |      |      |   | NSW  |    ".to_string(),
        "    +------+------+---+      |    ".to_string(),
        "                  |   +------+    ".to_string(),
        "                  | V |           ".to_string(),
        "                  +---+           ".to_string(),
        "                                  ".to_string(),
        "                      +---+       ".to_string(),
        "                      | T |       ".to_string(),
        "                      +---+       ".to_string(),
    ];

    if let Some(assignment) = assignment {
        let color_codes = HashMap::from([
            ("red", "\x1b[41m"),
            ("green", "\x1b[42m"),
            ("blue", "\x1b[44m"),
        ]);
        let reset = "\x1b[0m";
        let regions = [
            ("WA", (4, 5)),
            ("NT", (12, 5)),
            ("SA", (20, 5)),
            ("Q", (24, 1)),
            ("NSW", (24, 6)),
            ("V", (22, 9)),
            ("T", (24, 13)),
        ];
        for (name, (x, y)) in regions {
            let Some(var) = csp.get_variable(name) else { continue };
            if let Some(color) = assignment.get(var.id()) {
                if let Some(code) = color_codes.get(color.as_str()) {
                    let row = &mut map[y];
                    let colored_char = format!("{code} {reset}");
                    let new_row = row[0..x].to_string() + &colored_char + &row[x + 1..].to_string();
                    map[y] = new_row;
                }
            }
        }
    }

    println!("Australia Map Coloring:");
    for line in map {
        println!("{line}");
    }
    if assignment.is_some() {
        println!("\nColor Legend:");
        println!("\x1b[41m  \x1b[0m Red");
        println!("\x1b[42m  \x1b[0m Green");
        println!("\x1b[44m  \x1b[0m Blue");
    }
}
