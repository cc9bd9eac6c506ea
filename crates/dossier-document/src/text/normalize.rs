// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text normaliser — strips lightweight markdown decoration and control
// characters so arbitrary narrative text lays out as plain single-spaced
// prose. Pure and idempotent.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static STRONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*|__([^_\n]+?)__").expect("valid strong regex"));

// A single `*` followed by a space is a bullet, not emphasis.
static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^\s*][^*\n]*?)\*").expect("valid emphasis regex"));

// Any stack of heading, ordered-list, and bullet markers at a line start.
static LINE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?:#{1,6}|\d{1,3}[.)]|[-*+•])[ \t]+)+").expect("valid prefix regex")
});

static ARTIFACTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*{2,}|_{2,}|`+").expect("valid artifact regex"));

static LINE_BREAKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t\x0B\x0C]+").expect("valid line-break regex"));

static CONTROLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x1F\x7F\u{200B}\u{FEFF}]").expect("valid control regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Upper bound on markup passes; real input settles in two.
const MAX_PASSES: usize = 8;

/// Normalise `raw` for layout.
///
/// With `is_narrative` set, markdown headings, emphasis, bullets, and
/// ordered-list numbers are removed first (bullets become a single leading
/// `• `). Then line breaks and tabs become spaces, control characters are
/// dropped, whitespace runs collapse to one space, and the ends are trimmed.
///
/// Removing one layer of markup can expose another (`` `- x` `` becomes a
/// bullet once the backticks go), so the pass repeats until nothing changes.
pub fn normalize(raw: &str, is_narrative: bool) -> String {
    let mut current = normalize_pass(raw, is_narrative);
    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current, is_narrative);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn normalize_pass(raw: &str, is_narrative: bool) -> String {
    let mut text = if is_narrative {
        strip_markup(raw)
    } else {
        raw.to_owned()
    };

    text = LINE_BREAKS.replace_all(&text, " ").into_owned();
    // Controls go before the whitespace collapse so their removal cannot
    // leave a double space behind.
    text = CONTROLS.replace_all(&text, "").into_owned();
    text = WHITESPACE.replace_all(&text, " ").into_owned();
    text.trim().to_owned()
}

fn strip_markup(raw: &str) -> String {
    let text = STRONG.replace_all(raw, |caps: &Captures| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map_or(String::new(), |m| m.as_str().to_owned())
    });
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = LINE_PREFIX.replace_all(&text, |caps: &Captures| {
        let prefix = &caps[0];
        if prefix.contains(['-', '*', '+', '•']) {
            "• ".to_owned()
        } else {
            String::new()
        }
    });
    ARTIFACTS.replace_all(&text, "").into_owned()
}
