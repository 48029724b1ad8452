/// Synthetic C-like source with nested compound tokens.
pub fn source(repeat: usize) -> String {
    let unit = concat!(
        "/* helper */\n",
        "fn scale(items: [i32], factor: i32) {\n",
        "    let total = items.len() * factor; // product\n",
        "    if (total >= 0x10 && flags[2] != 0) { print(\"ok \\\"done\\\"\"); }\n",
        "}\n",
    );
    unit.repeat(repeat)
}
