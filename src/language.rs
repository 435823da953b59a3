//! Language identifier mapping
//!
//! The surrounding application labels languages for display ("C# Language",
//! "Golang"); the engines key their runtime inventory by their own canonical
//! ids ("csharp", "go"). This module translates between the two. Pure
//! functions, no network access.

/// Decorative suffixes some display labels carry; stripped before lookup
const DECORATIVE_SUFFIXES: &[&str] = &[" language", " lang"];

/// Translate a human-facing language label into the engine's canonical id.
///
/// Labels are trimmed, lower-cased and stripped of decorative suffixes
/// before lookup. Unknown labels fall back to the normalized input so that
/// languages added to an engine ahead of this table still resolve. An empty
/// label maps to an empty string, which the orchestrator rejects as a
/// validation error.
pub fn canonical_id(label: &str) -> String {
    let mut name = label.trim().to_lowercase();
    for suffix in DECORATIVE_SUFFIXES {
        if let Some(stripped) = name.strip_suffix(suffix) {
            name = stripped.trim_end().to_string();
        }
    }

    match name.as_str() {
        "python" | "python 3" | "python3" | "py" => "python",
        "python 2" | "python2" => "python2",
        "javascript" | "js" | "node" | "node.js" | "nodejs" => "javascript",
        "typescript" | "ts" => "typescript",
        "java" => "java",
        "c" => "c",
        "c++" | "cpp" => "c++",
        "c#" | "csharp" => "csharp",
        "f#" | "fsharp" => "fsharp.net",
        "go" | "golang" => "go",
        "rust" | "rs" => "rust",
        "kotlin" | "kt" => "kotlin",
        "swift" => "swift",
        "ruby" | "rb" => "ruby",
        "php" => "php",
        "perl" => "perl",
        "raku" | "perl 6" | "perl6" => "raku",
        "scala" => "scala",
        "haskell" | "hs" => "haskell",
        "lua" => "lua",
        "r" => "rscript",
        "dart" => "dart",
        "elixir" => "elixir",
        "erlang" => "erlang",
        "clojure" => "clojure",
        "bash" | "shell" | "sh" => "bash",
        "powershell" | "pwsh" => "powershell",
        "fortran" => "fortran",
        "pascal" => "pascal",
        "prolog" => "prolog",
        "ocaml" => "ocaml",
        "groovy" => "groovy",
        "julia" => "julia",
        "nim" => "nim",
        "crystal" => "crystal",
        "zig" => "zig",
        "d" => "d",
        "cobol" => "cobol",
        "lisp" | "common lisp" => "lisp",
        "racket" => "racket",
        "scheme" => "racket",
        "emacs lisp" | "elisp" => "emacs",
        "smalltalk" => "smalltalk",
        "basic" | "freebasic" => "freebasic",
        "visual basic" | "vb" | "vb.net" => "basic.net",
        "octave" | "matlab" => "octave",
        "sql" | "sqlite" => "sqlite3",
        "assembly" | "asm" => "nasm64",
        "awk" => "awk",
        "forth" => "forth",
        "coffeescript" => "coffeescript",
        "brainfuck" => "brainfuck",
        "v" | "vlang" => "vlang",
        other => other,
    }
    .to_string()
}
