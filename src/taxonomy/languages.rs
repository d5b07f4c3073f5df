// Assumed size when only a language's presence is known.
pub const DEFAULT_PROJECT_BYTES: u64 = 3_000;

pub fn typical_project_bytes(language: &str) -> u64 {
    match language {
        "Rust" => 15_000,
        "Java" => 12_000,
        "Dart" => 12_000,
        "TypeScript" => 8_000,
        "Vue" => 10_000,
        "C++" => 10_000,
        "CSS" => 6_000,
        "Jupyter Notebook" => 5_000,
        "SCSS" => 4_000,
        "Makefile" => 1_000,
        _ => DEFAULT_PROJECT_BYTES,
    }
}
