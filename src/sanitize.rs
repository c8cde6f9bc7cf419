//! Whitelist HTML filter applied to strings before they leave the API.
//!
//! Tags on the whitelist are rebuilt with their allowed attributes only.
//! Anything else that looks like a tag is escaped so it renders as text.

const URL_ATTRS: &[&str] = &["href", "src"];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn allowed_attrs(tag: &str) -> Option<&'static [&'static str]> {
    let attrs: &'static [&'static str] = match tag {
        "a" => &["target", "href", "title"],
        "img" => &["src", "alt", "title", "width", "height"],
        "abbr" => &["title"],
        "font" => &["color", "size", "face"],
        "td" | "th" => &["width", "colspan", "rowspan", "align", "valign"],
        "address" | "article" | "aside" | "b" | "big" | "blockquote" | "br" | "caption"
        | "center" | "cite" | "code" | "dd" | "del" | "details" | "div" | "dl" | "dt" | "em"
        | "figcaption" | "figure" | "footer" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        | "header" | "hr" | "i" | "ins" | "li" | "mark" | "nav" | "ol" | "p" | "pre" | "s"
        | "section" | "small" | "span" | "strike" | "strong" | "sub" | "summary" | "sup"
        | "table" | "tbody" | "tfoot" | "thead" | "tr" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attrs)
}

/// Returns `input` with unsafe markup removed or encoded.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let Some(end) = tag_end(candidate) else {
            out.push_str("&lt;");
            rest = &candidate[1..];
            continue;
        };

        let raw = &candidate[..=end];
        match Tag::parse(raw) {
            Some(tag) => match allowed_attrs(&tag.name) {
                Some(allowed) => tag.write(allowed, &mut out),
                None => out.push_str(&escape_tag(raw)),
            },
            None => out.push_str(&escape_tag(raw)),
        }
        rest = &candidate[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Byte offset of the `>` closing the tag that `s` starts with. Quoted
/// attribute values may contain `>`.
fn tag_end(s: &str) -> Option<usize> {
    let mut quote = None;
    let mut after_eq = false;

    for (i, c) in s.char_indices().skip(1) {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '>' => return Some(i),
            '<' => return None,
            '"' | '\'' if after_eq => quote = Some(c),
            _ => {}
        }
        if !c.is_whitespace() {
            after_eq = c == '=';
        }
    }
    None
}

fn escape_tag(raw: &str) -> String {
    raw.replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Resolves character references the way a browser would before it looks at
/// an attribute value. References that do not resolve are left as text.
fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match decode_reference(after) {
            Some((c, len)) => {
                out.push(c);
                rest = &after[len..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Decodes the reference `s` starts with (the text after `&`), returning the
/// character and the number of bytes it spans. The trailing `;` is optional.
fn decode_reference(s: &str) -> Option<(char, usize)> {
    if let Some(num) = s.strip_prefix('#') {
        let (prefix, radix) = if num.starts_with(['x', 'X']) {
            (2, 16)
        } else {
            (1, 10)
        };
        let digits = &s[prefix..];
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let c = u32::from_str_radix(&digits[..len], radix)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        let semi = usize::from(digits[len..].starts_with(';'));
        return Some((c, prefix + len + semi));
    }

    let len = s
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(s.len());
    let c = match &s[..len] {
        "colon" => ':',
        "Tab" => '\t',
        "NewLine" => '\n',
        "sol" => '/',
        "quest" => '?',
        "num" => '#',
        "lpar" => '(',
        "rpar" => ')',
        "amp" | "AMP" => '&',
        "lt" | "LT" => '<',
        "gt" | "GT" => '>',
        "quot" | "QUOT" => '"',
        "apos" => '\'',
        _ => return None,
    };
    let semi = usize::from(s[len..].starts_with(';'));
    Some((c, len + semi))
}

fn is_safe_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();

    let path_start = compact.find(['/', '?', '#']).unwrap_or(compact.len());
    match compact[..path_start].find(':') {
        Some(colon) => SAFE_SCHEMES.contains(&&compact[..colon]),
        None => true,
    }
}

struct Tag {
    name: String,
    closing: bool,
    self_closing: bool,
    attrs: Vec<(String, Option<String>)>,
}

impl Tag {
    fn parse(raw: &str) -> Option<Tag> {
        let inner = &raw[1..raw.len() - 1];
        let (closing, inner) = match inner.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, inner),
        };

        let name_len = inner
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(inner.len());
        let name = &inner[..name_len];
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }

        let rest = &inner[name_len..];
        if !(rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '/')) {
            return None;
        }

        Some(Tag {
            name: name.to_ascii_lowercase(),
            closing,
            self_closing: !closing && rest.trim_end().ends_with('/'),
            attrs: if closing { Vec::new() } else { parse_attrs(rest) },
        })
    }

    fn write(&self, allowed: &[&str], out: &mut String) {
        if self.closing {
            out.push_str("</");
            out.push_str(&self.name);
            out.push('>');
            return;
        }

        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            if !allowed.contains(&name.as_str()) {
                continue;
            }
            match value {
                Some(v) => {
                    let v = decode_entities(v);
                    if URL_ATTRS.contains(&name.as_str()) && !is_safe_url(&v) {
                        continue;
                    }
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(&v));
                    out.push('"');
                }
                None => {
                    out.push(' ');
                    out.push_str(name);
                }
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
    }
}

fn parse_attrs(mut s: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();

    loop {
        s = s.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if s.is_empty() {
            break;
        }

        let name_len = s
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(s.len());
        let name = s[..name_len].to_ascii_lowercase();
        s = s[name_len..].trim_start();

        let value = match s.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                let (value, rest) = match after.chars().next() {
                    Some(q @ ('"' | '\'')) => {
                        let body = &after[1..];
                        match body.find(q) {
                            Some(close) => (&body[..close], &body[close + 1..]),
                            None => (body, ""),
                        }
                    }
                    _ => {
                        let len = after.find(char::is_whitespace).unwrap_or(after.len());
                        (&after[..len], &after[len..])
                    }
                };
                s = rest;
                Some(value.to_string())
            }
            None => None,
        };

        if !name.is_empty() {
            attrs.push((name, value));
        }
    }

    attrs
}
