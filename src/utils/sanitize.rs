//! Field-level cleaning of untrusted form input.
//!
//! Sanitizers never fail: malformed input is cleaned, not rejected. The one
//! rejecting check is [`has_dangerous_content`], which callers use to refuse a
//! submission outright before anything is cleaned or stored.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use crate::dto::candidate_dto::CandidateForm;

pub const DEFAULT_MAX_LENGTH: usize = 255;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_PHONE_LENGTH: usize = 15;
pub const MAX_FILENAME_LENGTH: usize = 255;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Inline formatting tags kept when `allow_html` is set. Attributes are always dropped.
const SAFE_TAGS: &[&str] = &["b", "i", "em", "strong", "p", "br"];

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<\s*(script|style)\b[^>]*>.*?<\s*/\s*(script|style)\s*>")
        .expect("script block pattern")
});

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(?:(/?)([A-Za-z][A-Za-z0-9]*)|[!?])[^>]*>").expect("tag pattern")
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

static PATH_TRAVERSAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.\./|\.\.\\").expect("path traversal pattern"));

static DANGEROUS_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)<\s*/?\s*script\b",
        r"(?i)javascript\s*:",
        r"(?i)vbscript\s*:",
        r"(?i)\bon\w+\s*=",
        r"(?i)expression\s*\(",
        r"(?i)<\?php",
        r"(?s)<%.*?%>",
    ])
    .expect("dangerous content patterns")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    Lowercase,
    Uppercase,
}

#[derive(Debug, Clone, Copy)]
pub struct StringOptions {
    pub allow_html: bool,
    pub max_length: usize,
    pub trim: bool,
    pub case_transform: Option<CaseTransform>,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            allow_html: false,
            max_length: DEFAULT_MAX_LENGTH,
            trim: true,
            case_transform: None,
        }
    }
}

impl StringOptions {
    pub fn max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NumberOptions {
    pub min: f64,
    pub max: f64,
    pub integer_only: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            integer_only: false,
        }
    }
}

fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

fn push_text(out: &mut String, text: &str) {
    out.extend(text.chars().filter(|c| *c != '<' && *c != '>'));
}

/// Removes markup. Script and style elements go with their content; other tags
/// are dropped unless listed in `allowed`, in which case they are re-emitted bare.
/// Never produces a longer string than it was given.
fn clean_markup(input: &str, allowed: &[&str]) -> String {
    let without_blocks = SCRIPT_BLOCK.replace_all(input, "");
    let mut out = String::with_capacity(without_blocks.len());
    let mut last = 0;

    for caps in TAG.captures_iter(&without_blocks) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut out, &without_blocks[last..whole.start()]);
        last = whole.end();

        let Some(name) = caps.get(2) else { continue };
        let name = name.as_str().to_ascii_lowercase();
        if allowed.contains(&name.as_str()) {
            out.push('<');
            if caps.get(1).is_some_and(|slash| !slash.as_str().is_empty()) {
                out.push('/');
            }
            out.push_str(&name);
            out.push('>');
        }
    }
    push_text(&mut out, &without_blocks[last..]);
    out
}

pub fn sanitize_string(input: &str, options: &StringOptions) -> String {
    let mut processed = if options.trim {
        input.trim().to_string()
    } else {
        input.to_string()
    };

    processed = match options.case_transform {
        Some(CaseTransform::Lowercase) => processed.to_lowercase(),
        Some(CaseTransform::Uppercase) => processed.to_uppercase(),
        None => processed,
    };

    processed = truncate_chars(&processed, options.max_length);

    let allowed = if options.allow_html { SAFE_TAGS } else { &[] };
    let cleaned = clean_markup(&processed, allowed);

    if options.trim {
        cleaned.trim().to_string()
    } else {
        cleaned
    }
}

pub fn sanitize_email(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let cleaned = clean_markup(&lowered, &[]);
    let compact: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();
    truncate_chars(&compact, MAX_EMAIL_LENGTH)
}

pub fn sanitize_phone(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_PHONE_LENGTH)
        .collect()
}

/// Returns the cleaned number as a string, or an empty string if nothing numeric remains.
pub fn sanitize_number(input: &str, options: &NumberOptions) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let numeric: String = if options.integer_only {
        trimmed.chars().filter(|c| c.is_ascii_digit()).collect()
    } else {
        let kept: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        match kept.split_once('.') {
            Some((whole, fraction)) => format!("{}.{}", whole, fraction.replace('.', "")),
            None => kept,
        }
    };

    let Ok(mut value) = numeric.parse::<f64>() else {
        return String::new();
    };
    if value.is_nan() {
        return String::new();
    }
    if value < options.min {
        value = options.min;
    }
    if value > options.max {
        value = options.max;
    }
    if !value.is_finite() {
        return String::new();
    }
    if options.integer_only {
        value = value.trunc();
    }
    value.to_string()
}

pub fn sanitize_filename(input: &str) -> String {
    let without_traversal = PATH_TRAVERSAL.replace_all(input, "");
    let replaced: String = without_traversal
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Only ASCII survives the replacement, so byte offsets are char offsets.
    if replaced.len() <= MAX_FILENAME_LENGTH {
        return replaced;
    }

    match replaced.rfind('.') {
        Some(dot) if replaced.len() - dot < MAX_FILENAME_LENGTH => {
            let extension = &replaced[dot + 1..];
            let keep = MAX_FILENAME_LENGTH - extension.len() - 1;
            format!("{}.{}", &replaced[..keep.min(dot)], extension)
        }
        _ => replaced[..MAX_FILENAME_LENGTH].to_string(),
    }
}

/// Cleans a password without touching anything that affects its strength score.
pub fn sanitize_password(input: &str) -> String {
    let without_control: String = input
        .chars()
        .filter(|c| !matches!(*c, '\u{0}'..='\u{1F}' | '\u{7F}'))
        .collect();
    let collapsed = WHITESPACE_RUN.replace_all(without_control.trim(), " ");
    truncate_chars(&collapsed, MAX_PASSWORD_LENGTH)
}

pub fn has_dangerous_content(input: &str) -> bool {
    !input.is_empty() && DANGEROUS_PATTERNS.is_match(input)
}

/// Names of the raw form fields that must cause the whole submission to be refused.
pub fn dangerous_fields(form: &CandidateForm) -> Vec<String> {
    form.text_fields()
        .filter(|(_, value)| has_dangerous_content(value))
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Applies the matching field sanitizer to each recognized field. Documents and
/// unrecognized fields pass through untouched.
pub fn sanitize_form_data(form: CandidateForm) -> CandidateForm {
    let text = |value: Option<String>, max_length: usize| {
        value.map(|v| sanitize_string(&v, &StringOptions::max_length(max_length)))
    };
    let age_options = NumberOptions {
        min: 1.0,
        max: 120.0,
        integer_only: true,
    };

    CandidateForm {
        name: text(form.name, 100),
        age: form.age.map(|v| sanitize_number(&v, &age_options)),
        email: form.email.map(|v| sanitize_email(&v)),
        password: form.password.map(|v| sanitize_password(&v)),
        mobile: form.mobile.map(|v| sanitize_phone(&v)),
        qualification: text(form.qualification, 50),
        location: text(form.location, 100),
        occupation_status: text(form.occupation_status, 50),
        resume: form.resume,
        id_proof: form.id_proof,
        extra: form.extra,
    }
}
