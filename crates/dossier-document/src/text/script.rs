// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Script classification by Unicode code-point ranges, plus segmentation of a
// line into maximal same-script runs so every run gets a font that can draw it.

use dossier_core::ScriptClass;

/// Script of a single character, or `None` for neutral characters
/// (whitespace, digits, punctuation, symbols, and letters of scripts with
/// no font family of their own) that take the script of their surroundings.
pub fn script_of(c: char) -> Option<ScriptClass> {
    match c as u32 {
        0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF => Some(ScriptClass::Cjk),
        0x0400..=0x04FF => Some(ScriptClass::Cyrillic),
        0x0600..=0x06FF => Some(ScriptClass::Arabic),
        _ if is_latin_letter(c) => Some(ScriptClass::Latin),
        _ => None,
    }
}

/// Script used to pick a font for `c` when segmenting a line. Kana, Hangul,
/// CJK punctuation and fullwidth forms only exist in the CJK faces, so they
/// resolve to the CJK family even though [`classify`] does not count them.
pub fn font_script_of(c: char) -> Option<ScriptClass> {
    script_of(c).or_else(|| is_cjk_affine(c).then_some(ScriptClass::Cjk))
}

/// Letters drawn by the body faces: Latin, IPA, and Greek.
fn is_latin_letter(c: char) -> bool {
    c.is_alphabetic()
        && matches!(
            c as u32,
            0x0041..=0x005A
                | 0x0061..=0x007A
                | 0x00AA
                | 0x00B5
                | 0x00BA
                | 0x00C0..=0x02AF
                | 0x0370..=0x03FF
                | 0x1E00..=0x1FFF
                | 0x2C60..=0x2C7F
                | 0xA720..=0xA7FF
                | 0xFB00..=0xFB06
        )
}

fn is_cjk_affine(c: char) -> bool {
    matches!(
        c as u32,
        0x1100..=0x11FF         // Hangul Jamo
            | 0x2E80..=0x2FDF   // CJK and Kangxi radicals
            | 0x3000..=0x303F   // CJK symbols and punctuation
            | 0x3040..=0x30FF   // Hiragana, Katakana
            | 0x3100..=0x318F   // Bopomofo, Hangul compatibility Jamo
            | 0x31F0..=0x33FF   // Katakana extensions, enclosed CJK, compatibility
            | 0xAC00..=0xD7AF   // Hangul syllables
            | 0xFE30..=0xFE4F   // CJK compatibility forms
            | 0xFF00..=0xFFEF   // Halfwidth and fullwidth forms
            | 0x20000..=0x3134F // Supplementary ideographs
    )
}

/// Whole-fragment classification. CJK beats Cyrillic beats Arabic beats
/// Latin, regardless of where in the fragment each script appears.
pub fn classify(text: &str) -> ScriptClass {
    let mut found_cyrillic = false;
    let mut found_arabic = false;

    for c in text.chars() {
        match script_of(c) {
            Some(ScriptClass::Cjk) => return ScriptClass::Cjk,
            Some(ScriptClass::Cyrillic) => found_cyrillic = true,
            Some(ScriptClass::Arabic) => found_arabic = true,
            _ => {}
        }
    }

    if found_cyrillic {
        ScriptClass::Cyrillic
    } else if found_arabic {
        ScriptClass::Arabic
    } else {
        ScriptClass::Latin
    }
}

/// A maximal slice of a line written in one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptRun<'a> {
    pub script: ScriptClass,
    pub text: &'a str,
}

/// Split `text` into maximal same-script runs.
///
/// Characters are grouped by [`font_script_of`], so kana and fullwidth
/// punctuation stay in the run of the ideographs around them.
/// Neutral characters extend the run in progress; neutrals that lead the
/// text join the first classified run. Text with no classified character at
/// all is a single Latin run. Concatenating the run texts yields `text`.
pub fn segment_runs(text: &str) -> Vec<ScriptRun<'_>> {
    let mut runs = Vec::new();
    let mut current: Option<ScriptClass> = None;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        let Some(script) = font_script_of(c) else {
            continue;
        };
        match current {
            None => current = Some(script),
            Some(active) if active != script => {
                runs.push(ScriptRun {
                    script: active,
                    text: &text[start..idx],
                });
                start = idx;
                current = Some(script);
            }
            Some(_) => {}
        }
    }

    if start < text.len() {
        runs.push(ScriptRun {
            script: current.unwrap_or(ScriptClass::Latin),
            text: &text[start..],
        });
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_outranks_latin() {
        assert_eq!(classify("Result: 正常"), ScriptClass::Cjk);
        assert_eq!(classify("正常 (normal)"), ScriptClass::Cjk);
    }

    #[test]
    fn cyrillic_outranks_arabic() {
        assert_eq!(classify("مرحبا привет"), ScriptClass::Cyrillic);
        assert_eq!(classify("مرحبا hello"), ScriptClass::Arabic);
    }

    #[test]
    fn plain_and_empty_text_is_latin() {
        assert_eq!(classify("Patient shows mild elevation."), ScriptClass::Latin);
        assert_eq!(classify(""), ScriptClass::Latin);
        assert_eq!(classify("12 + 30 = 42"), ScriptClass::Latin);
    }

    #[test]
    fn compatibility_and_extension_a_ranges_are_cjk() {
        assert_eq!(classify("\u{3400}"), ScriptClass::Cjk);
        assert_eq!(classify("\u{F900}"), ScriptClass::Cjk);
        assert_eq!(classify("\u{9FFF}"), ScriptClass::Cjk);
    }

    #[test]
    fn mixed_line_splits_into_script_runs() {
        let runs = segment_runs("正常 (normal)");
        assert_eq!(
            runs,
            vec![
                ScriptRun {
                    script: ScriptClass::Cjk,
                    text: "正常 (",
                },
                ScriptRun {
                    script: ScriptClass::Latin,
                    text: "normal)",
                },
            ]
        );
    }

    #[test]
    fn leading_neutrals_join_first_run() {
        let runs = segment_runs("• 12 Привет мир");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].script, ScriptClass::Cyrillic);
        assert_eq!(runs[0].text, "• 12 Привет мир");
    }

    #[test]
    fn runs_cover_the_whole_line() {
        let line = "ok 正常 да ok";
        let runs = segment_runs(line);
        let joined: String = runs.iter().map(|r| r.text).collect();
        assert_eq!(joined, line);
        let scripts: Vec<_> = runs.iter().map(|r| r.script).collect();
        assert_eq!(
            scripts,
            vec![
                ScriptClass::Latin,
                ScriptClass::Cjk,
                ScriptClass::Cyrillic,
                ScriptClass::Latin
            ]
        );
    }

    #[test]
    fn neutral_only_text_is_one_latin_run() {
        let runs = segment_runs("-- 42 --");
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].script, ScriptClass::Latin);
        assert!(segment_runs("").is_empty());
    }

    #[test]
    fn japanese_sentence_is_one_cjk_run() {
        let runs = segment_runs("これは正常です");
        assert_eq!(
            runs,
            vec![ScriptRun {
                script: ScriptClass::Cjk,
                text: "これは正常です",
            }]
        );
        assert_eq!(classify("これは正常です"), ScriptClass::Cjk);
    }

    #[test]
    fn hangul_and_kana_alone_resolve_to_cjk_fonts() {
        assert_eq!(segment_runs("정상")[0].script, ScriptClass::Cjk);
        assert_eq!(segment_runs("カタカナ")[0].script, ScriptClass::Cjk);
        // Whole-fragment classification keeps its fixed ranges.
        assert_eq!(classify("カタカナ"), ScriptClass::Latin);
    }

    #[test]
    fn fullwidth_punctuation_after_latin_starts_a_cjk_run() {
        let runs = segment_runs("Result：正常。");
        assert_eq!(
            runs,
            vec![
                ScriptRun {
                    script: ScriptClass::Latin,
                    text: "Result",
                },
                ScriptRun {
                    script: ScriptClass::Cjk,
                    text: "：正常。",
                },
            ]
        );

        let scripts: Vec<_> = segment_runs("Hello、world").iter().map(|r| r.script).collect();
        assert_eq!(
            scripts,
            vec![ScriptClass::Latin, ScriptClass::Cjk, ScriptClass::Latin]
        );
    }

    #[test]
    fn accented_and_greek_letters_are_latin() {
        assert_eq!(script_of('é'), Some(ScriptClass::Latin));
        assert_eq!(script_of('ß'), Some(ScriptClass::Latin));
        assert_eq!(script_of('μ'), Some(ScriptClass::Latin));
        assert_eq!(script_of('こ'), None);
        assert_eq!(font_script_of('こ'), Some(ScriptClass::Cjk));
        // Letters with no family of their own are neutral.
        assert_eq!(script_of('ש'), None);
        assert_eq!(segment_runs("shalom שלום").len(), 1);
    }
}
