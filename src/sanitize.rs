// SPDX-License-Identifier: GPL-3.0-only

//! Tool-noise stripping for transcript text.
//!
//! Assistant turns in both input formats carry embedded tool-invocation
//! markup that should never appear in a shared quote: paired markup tags,
//! fenced blocks tagged as tool payloads, and bare tool-call lines. This
//! module removes all of it and normalizes the remaining whitespace.
//!
//! The transform is deterministic and idempotent: applying [`sanitize`] to
//! its own output is a no-op. All patterns are fixed constants; input text is
//! only ever treated as data.

use regex::Regex;
use std::sync::LazyLock;

/// Paired markup regions removed wholesale, delimiters included.
///
/// Covers tool invocations, tool results, injected system reminders, and
/// internal reasoning blocks.
static TAG_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<tool_use>.*?</tool_use>|<tool_result>.*?</tool_result>|<system-reminder>.*?</system-reminder>|<thinking>.*?</thinking>",
    )
    .unwrap()
});

/// Fenced code blocks whose language tag marks them as tool payloads.
static TOOL_FENCES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```tool_(?:use|result)[^\n]*\n.*?^```[ \t]*$\n?").unwrap()
});

/// Standalone tool-invocation call lines.
///
/// Three shapes: a known tool name with a parenthesized argument list filling
/// the whole line, a filesystem-MCP style `filesystem:tool(...)` line, and a
/// generic `mcp__server__tool(...)` line.
static TOOL_CALL_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:(?:Search|Bash|Read|Write|Update|Fetch|Edit|Glob|Grep|Task|TodoWrite|WebFetch|WebSearch|LSP|NotebookEdit)|filesystem:[A-Za-z_][A-Za-z0-9_]*|mcp__[A-Za-z0-9_-]+__[A-Za-z0-9_-]+)\([^\n]*\)[ \t]*$\n?",
    )
    .unwrap()
});

/// Runs of three or more newlines, collapsed to a single blank line.
static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strips tool-invocation noise from a candidate turn's text.
///
/// Applied to every turn before it becomes a [`Message`], regardless of
/// which input format produced it. Returns the cleaned text, trimmed; the
/// caller drops the turn entirely if the result is empty.
///
/// Removing a region can splice the text around it into a new complete
/// region (or expose an indented fence to the line-start anchor after
/// trimming), so the whole pipeline repeats until a pass changes nothing.
/// Every pass only removes characters, so the loop terminates.
///
/// [`Message`]: crate::message::Message
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut text = text.trim().to_owned();
    loop {
        let pass = TAG_BLOCKS.replace_all(&text, "");
        let pass = TOOL_FENCES.replace_all(&pass, "");
        let pass = TOOL_CALL_LINES.replace_all(&pass, "");
        let pass = NEWLINE_RUNS.replace_all(&pass, "\n\n");
        let pass = pass.trim();
        if pass == text {
            return text;
        }
        text = pass.to_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_paired_tool_tags() {
        let input = "before\n<tool_use>Bash stuff</tool_use>\nafter";
        assert_eq!(sanitize(input), "before\n\nafter");
    }

    #[test]
    fn removes_tool_result_and_reminder_tags() {
        let input = "a <tool_result>out</tool_result> b <system-reminder>note</system-reminder> c";
        assert_eq!(sanitize(input), "a  b  c");
    }

    #[test]
    fn removes_thinking_blocks_non_greedily() {
        let input = "<thinking>one</thinking> keep <thinking>two</thinking>";
        assert_eq!(sanitize(input), "keep");
    }

    #[test]
    fn removes_tool_tagged_fences() {
        let input = "intro\n```tool_result\nls output\nmore\n```\noutro";
        assert_eq!(sanitize(input), "intro\noutro");
    }

    #[test]
    fn keeps_ordinary_code_fences() {
        let input = "```rust\nfn main() {}\n```";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn removes_known_tool_call_lines() {
        let input = "First paragraph.\n\nBash(ls -la)\n\nSecond paragraph.";
        assert_eq!(sanitize(input), "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn removes_indented_tool_call_lines() {
        let input = "text\n  Read(/tmp/file.txt)\nmore";
        assert_eq!(sanitize(input), "text\nmore");
    }

    #[test]
    fn removes_mcp_style_call_lines() {
        let input = "a\nfilesystem:read_file(path=/etc/hosts)\nmcp__github__create_issue(title)\nb";
        assert_eq!(sanitize(input), "a\nb");
    }

    #[test]
    fn keeps_tool_names_with_trailing_prose() {
        let input = "Bash(ls) is a tool invocation";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn keeps_unknown_call_expressions() {
        let input = "Frobnicate(x, y)";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn collapses_newline_runs() {
        assert_eq!(sanitize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(sanitize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_result() {
        assert_eq!(sanitize("  \n hello \n  "), "hello");
    }

    #[test]
    fn empty_after_stripping() {
        assert_eq!(sanitize("<tool_use>only noise</tool_use>"), "");
        assert_eq!(sanitize("Bash(ls)\n"), "");
    }

    #[test]
    fn treats_regex_metacharacters_as_data() {
        let input = "weird (.*) [a-z]+ \\d{3} text";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn strips_spliced_tag_pairs_completely() {
        // Removing the inner pair leaves the surrounding text forming a new
        // complete pair; that remainder must not survive either.
        let input = "<tool_<tool_use>x</tool_use>use>y</tool_use>";
        assert_eq!(sanitize(input), "");
    }

    #[test]
    fn idempotent() {
        let cases = [
            "plain text",
            "before\n<tool_use>x</tool_use>\n\n\nafter",
            "a\nBash(ls -la)\nb\n```tool_use sh\nls\n```\nc",
            "<system-reminder>hi</system-reminder>",
            "",
            "a\n\n\n\n\nb\n\n\nc",
            "<tool_<tool_use>x</tool_use>use>y</tool_use>",
            "<thinking><thinking>a</thinking>b</thinking>",
            "  ```tool_result\nout\n```",
        ];
        for case in cases {
            let once = sanitize(case);
            assert_eq!(sanitize(&once), once, "not idempotent for {case:?}");
        }
    }
}
