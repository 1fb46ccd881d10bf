use grep::regex::RegexMatcher;
use grep::searcher::{Searcher, Sink, SinkMatch};
use std::error::Error;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// Source directories owned by this crate. Nothing outside them is scanned.
const SOURCE_ROOTS: [&str; 4] = ["score", "cli", "tests", "benches"];

// One source policy: a line regex plus a filter that decides whether a matching
// line is really a violation.
struct Rule {
    name: &'static str,
    pattern: &'static str,
    is_violation: fn(&str) -> bool,
    advice: &'static str,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "underscore-prefixed identifiers",
        pattern: r"\b(_[a-zA-Z0-9_]+)\b",
        is_violation: underscore_in_code,
        advice: "Either use the variable (removing the underscore) or remove it completely.",
    },
    Rule {
        name: "#[allow(dead_code)] attributes",
        pattern: r"#\s*\[\s*allow\s*\(\s*dead_code\s*\)\s*\]",
        is_violation: always,
        advice: "Either use the code (removing the attribute) or remove it completely.",
    },
    Rule {
        name: "change-log words in comments",
        pattern: r"(//|/\*).*\b(?:FIXED|CORRECTED|FIX|FIXES|NEW|CHANGED|CHANGES|CHANGE|MODIFIED|MODIFIES|MODIFY|UPDATED|UPDATES|UPDATE)\b",
        is_violation: always,
        advice: "Comments describe the code as it is, not how it got there.",
    },
    Rule {
        name: "'**' or all-uppercase comments",
        pattern: r"(//|/\*).*",
        is_violation: shouting_comment,
        advice: "Use plain sentence case; '**' is only allowed in doc comments.",
    },
];

// Collects every offending line of one file for one rule.
struct ViolationCollector {
    filter: fn(&str) -> bool,
    violations: Vec<String>,
}

impl Sink for ViolationCollector {
    type Error = std::io::Error;

    fn matched(&mut self, _: &Searcher, mat: &SinkMatch) -> Result<bool, Self::Error> {
        let line_number = mat.line_number().unwrap_or(0);
        let line_text = std::str::from_utf8(mat.bytes()).unwrap_or("").trim_end();
        if (self.filter)(line_text) {
            self.violations.push(format!("{line_number}:{line_text}"));
        }
        Ok(true)
    }
}

fn always(_: &str) -> bool {
    true
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

fn is_doc_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("///") || trimmed.starts_with("//!")
}

// Underscore names inside comments or string literals are not identifiers.
fn underscore_in_code(line: &str) -> bool {
    if is_comment(line) {
        return false;
    }
    let in_string = line
        .split('"')
        .enumerate()
        .any(|(i, part)| i % 2 == 1 && part.contains('_'));
    !in_string
}

fn shouting_comment(line: &str) -> bool {
    let Some(start) = line.find("//").or_else(|| line.find("/*")) else {
        return false;
    };
    // A `//` inside a string literal is not a comment.
    if line[..start].matches('"').count() % 2 == 1 {
        return false;
    }
    let comment = line[start..]
        .trim_start_matches('/')
        .trim_start_matches('!')
        .trim_start_matches('*')
        .trim_end_matches("*/");

    if !is_doc_comment(line) && comment.contains("**") {
        return true;
    }
    let letters: Vec<char> = comment.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() > 1 && letters.iter().all(|c| c.is_uppercase())
}

fn rust_sources() -> Vec<PathBuf> {
    SOURCE_ROOTS
        .iter()
        .flat_map(|root| WalkDir::new(root).into_iter().filter_map(|e| e.ok()))
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

fn check_rule(rule: &Rule, files: &[PathBuf]) -> Result<(), Box<dyn Error>> {
    let matcher = RegexMatcher::new_line_matcher(rule.pattern)?;
    let mut searcher = Searcher::new();
    for path in files {
        let mut collector = ViolationCollector {
            filter: rule.is_violation,
            violations: Vec::new(),
        };
        searcher.search_path(&matcher, path, &mut collector)?;
        if !collector.violations.is_empty() {
            return Err(report(rule, path, &collector.violations).into());
        }
    }
    Ok(())
}

fn report(rule: &Rule, path: &Path, violations: &[String]) -> String {
    let mut message = format!(
        "\n❌ ERROR: Found {} {} in {}:\n",
        violations.len(),
        rule.name,
        path.display()
    );
    for violation in violations {
        message.push_str(&format!("   {violation}\n"));
    }
    message.push_str(&format!("\n⚠️ {} are not allowed in this project.\n", rule.name));
    message.push_str(&format!("   {}\n", rule.advice));
    message
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    for root in SOURCE_ROOTS {
        println!("cargo:rerun-if-changed={root}");
    }

    let files = rust_sources();
    for rule in &RULES {
        if let Err(e) = check_rule(rule, &files) {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
