use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn gradeshape() -> Command {
    cargo_bin_cmd!("gradeshape")
}

/// code (weight 4): ex1 and ex2, each with tests (3) and style (1); git (1)
pub const STUDENT_GRADE: &str = r#"{
  "sub_grades": {
    "code": {
      "weight": 4,
      "grade": {
        "sub_grades": {
          "ex1": {"grade": {"sub_grades": {
            "tests": {"grade": {"points": 1.0, "comment": "all green"}, "weight": 3},
            "style": {"grade": {"points": 0.5}, "weight": 1}
          }}},
          "ex2": {"grade": {"sub_grades": {
            "tests": {"grade": {"points": 0.25, "comment": "two failures"}, "weight": 3},
            "style": {"grade": {"points": 1.0}, "weight": 1}
          }}}
        }
      }
    },
    "git": {"grade": {"points": 0.5, "comment": "few commits"}, "weight": 1}
  }
}"#;

#[allow(dead_code)]
pub const REPORT: &str = r#"version = 1

[report]
name = "midterm"
paths = ["code/tests", "code/style", "git"]
"#;

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
