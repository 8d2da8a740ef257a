//! Settings extraction from the target's free-form status output.
//!
//! The target prints human-readable lines that may embed `--camera=...`,
//! `--seed=<digits>` or `--ticks=<digits>` anywhere. Each flag is scanned
//! independently, case-insensitively, and the last matching line wins.

use std::sync::LazyLock;

use regex::Regex;

// The leading greedy `.*` picks the last occurrence within a line.
static CAMERA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*(--camera=.*)$").unwrap());
static SEED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*(--seed=[0-9]+)\b").unwrap());
static TICKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^.*(--ticks=[0-9]+)\b").unwrap());

/// Flags discovered in one run's output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    pub camera: Option<String>,
    pub seed: Option<String>,
    pub ticks: Option<String>,
}

/// Run all three scans over `text`.
pub fn discover(text: &str) -> Discovered {
    Discovered {
        camera: extract_camera(text),
        seed: extract_seed(text),
        ticks: extract_ticks(text),
    }
}

/// `--camera=<rest of line>` from the last matching line.
pub fn extract_camera(text: &str) -> Option<String> {
    last_capture(&CAMERA_RE, text)
}

/// `--seed=<digits>` from the last matching line.
pub fn extract_seed(text: &str) -> Option<String> {
    last_capture(&SEED_RE, text)
}

/// `--ticks=<digits>` from the last matching line.
pub fn extract_ticks(text: &str) -> Option<String> {
    last_capture(&TICKS_RE, text)
}

fn last_capture(re: &Regex, text: &str) -> Option<String> {
    text.split(is_line_break)
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .last()
}

/// Line boundaries, including bare carriage returns from progress output and
/// the Unicode separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_last_line_wins() {
        let text = "frame 1 --seed=123\nframe 2\nframe 3 --seed=456\n";
        assert_eq!(extract_seed(text).as_deref(), Some("--seed=456"));
    }

    #[test]
    fn camera_is_case_insensitive() {
        assert_eq!(
            extract_camera("--CAMERA=foo").as_deref(),
            Some("--CAMERA=foo")
        );
        assert_eq!(
            extract_camera("--camera=foo").as_deref(),
            Some("--camera=foo")
        );
    }

    #[test]
    fn camera_takes_rest_of_line() {
        let text = "position: --camera=1.0,2.5,-3 rot=0,90,0\n";
        assert_eq!(
            extract_camera(text).as_deref(),
            Some("--camera=1.0,2.5,-3 rot=0,90,0")
        );
    }

    #[test]
    fn ticks_with_trailing_letters_does_not_match() {
        assert_eq!(extract_ticks("--ticks=12abc"), None);
    }

    #[test]
    fn ticks_captures_exact_digit_run() {
        assert_eq!(
            extract_ticks("stopped at --ticks=100, exiting").as_deref(),
            Some("--ticks=100")
        );
    }

    #[test]
    fn flag_inside_line_with_other_flags() {
        let text = "settings: --seed=5 --ticks=77 --camera=0,0,0";
        let found = discover(text);
        assert_eq!(found.seed.as_deref(), Some("--seed=5"));
        assert_eq!(found.ticks.as_deref(), Some("--ticks=77"));
        assert_eq!(found.camera.as_deref(), Some("--camera=0,0,0"));
    }

    #[test]
    fn later_occurrence_in_same_line_wins() {
        assert_eq!(
            extract_ticks("--ticks=1 then --ticks=2").as_deref(),
            Some("--ticks=2")
        );
    }

    #[test]
    fn carriage_return_separates_lines() {
        let text = "--ticks=10\r--ticks=20\r";
        assert_eq!(extract_ticks(text).as_deref(), Some("--ticks=20"));
    }

    #[test]
    fn control_and_unicode_separators_split_lines() {
        let text = "--camera=a\x0c--ticks=1\u{2028}--camera=b\x1e--ticks=2\u{85}status";
        let found = discover(text);
        assert_eq!(found.camera.as_deref(), Some("--camera=b"));
        assert_eq!(found.ticks.as_deref(), Some("--ticks=2"));
    }

    #[test]
    fn scans_are_independent() {
        let found = discover("--camera=a\nnothing here\n");
        assert_eq!(found.camera.as_deref(), Some("--camera=a"));
        assert_eq!(found.seed, None);
        assert_eq!(found.ticks, None);
    }

    #[test]
    fn empty_text_finds_nothing() {
        assert_eq!(discover(""), Discovered::default());
    }
}
