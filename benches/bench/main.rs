// third-party imports
use criterion::criterion_main;

const ND: &str = ":"; // name delimiter
const GROUP: &str = "chartok";

mod samples;
mod tokenize;

criterion_main!(tokenize::benches);
