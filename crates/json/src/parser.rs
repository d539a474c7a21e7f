//! Byte-cursor recursive-descent parser.

use crate::error::JsonError;
use crate::value::{JsonArray, JsonObject, JsonValue};

/// Parse one JSON document. Trailing non-whitespace after the top-level
/// value is an error.
pub fn parse(input: &str) -> Result<JsonValue, JsonError> {
    let mut p = Parser::new(input.as_bytes());
    let value = p.read_any()?;
    p.skip_whitespace();
    if p.x < p.data.len() {
        return Err(JsonError::TrailingInput(p.x));
    }
    Ok(value)
}

struct Parser<'a> {
    data: &'a [u8],
    x: usize,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.data.get(self.x) {
            self.x += 1;
        }
    }

    /// Error for the current position: `Eof` past the end, otherwise
    /// `Invalid` at the offending byte.
    fn err_here(&self) -> JsonError {
        if self.x >= self.data.len() {
            JsonError::Eof
        } else {
            JsonError::Invalid(self.x)
        }
    }

    fn read_any(&mut self) -> Result<JsonValue, JsonError> {
        self.skip_whitespace();
        let Some(&b) = self.data.get(self.x) else {
            return Err(JsonError::Eof);
        };
        match b {
            b'{' => self.read_obj(),
            b'[' => self.read_arr(),
            b'"' => Ok(JsonValue::Str(self.read_str()?)),
            b't' => self.read_literal(b"true", JsonValue::Bool(true)),
            b'f' => self.read_literal(b"false", JsonValue::Bool(false)),
            b'n' => self.read_literal(b"null", JsonValue::Null),
            b'-' | b'0'..=b'9' => self.read_num(),
            _ => Err(JsonError::Invalid(self.x)),
        }
    }

    fn read_literal(&mut self, literal: &[u8], value: JsonValue) -> Result<JsonValue, JsonError> {
        let end = self.x + literal.len();
        if self.data.get(self.x..end) != Some(literal) {
            return Err(JsonError::Invalid(self.x));
        }
        self.x = end;
        Ok(value)
    }

    fn read_num(&mut self) -> Result<JsonValue, JsonError> {
        let start = self.x;
        let data = self.data;
        let len = data.len();
        let mut x = self.x;

        if x < len && data[x] == b'-' {
            x += 1;
        }
        let digits_start = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits_start {
            return Err(JsonError::InvalidNumber(start));
        }
        if x < len && data[x] == b'.' {
            x += 1;
            let frac_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == frac_start {
                return Err(JsonError::InvalidNumber(start));
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            let exp_start = x;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
            if x == exp_start {
                return Err(JsonError::InvalidNumber(start));
            }
        }
        self.x = x;

        // The scan only accepts ASCII, so the slice is valid UTF-8.
        let text = std::str::from_utf8(&data[start..x]).map_err(|_| JsonError::InvalidUtf8)?;
        let n: f64 = text.parse().map_err(|_| JsonError::InvalidNumber(start))?;
        Ok(JsonValue::Number(n))
    }

    fn read_str(&mut self) -> Result<String, JsonError> {
        if self.data.get(self.x) != Some(&b'"') {
            return Err(self.err_here());
        }
        self.x += 1;
        let mut buf: Vec<u8> = Vec::new();
        let mut chunk_start = self.x;
        loop {
            let Some(&b) = self.data.get(self.x) else {
                return Err(JsonError::Eof);
            };
            match b {
                b'"' => {
                    // Fast path: no escapes seen, borrow straight from
                    // the input slice.
                    let tail = &self.data[chunk_start..self.x];
                    self.x += 1;
                    return if buf.is_empty() {
                        std::str::from_utf8(tail)
                            .map(str::to_string)
                            .map_err(|_| JsonError::InvalidUtf8)
                    } else {
                        buf.extend_from_slice(tail);
                        String::from_utf8(buf).map_err(|_| JsonError::InvalidUtf8)
                    };
                }
                b'\\' => {
                    buf.extend_from_slice(&self.data[chunk_start..self.x]);
                    self.x += 1;
                    self.read_escape(&mut buf)?;
                    chunk_start = self.x;
                }
                0x00..=0x1f => return Err(JsonError::Invalid(self.x)),
                _ => self.x += 1,
            }
        }
    }

    fn read_escape(&mut self, out: &mut Vec<u8>) -> Result<(), JsonError> {
        let esc_at = self.x - 1;
        let Some(&b) = self.data.get(self.x) else {
            return Err(JsonError::Eof);
        };
        self.x += 1;
        match b {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let hi = self.read_hex4()?;
                let code = if (0xd800..0xdc00).contains(&hi) {
                    // High surrogate: a low surrogate must follow.
                    if self.data.get(self.x) == Some(&b'\\')
                        && self.data.get(self.x + 1) == Some(&b'u')
                    {
                        self.x += 2;
                        let lo = self.read_hex4()?;
                        if !(0xdc00..0xe000).contains(&lo) {
                            return Err(JsonError::InvalidEscape(esc_at));
                        }
                        0x10000 + ((hi - 0xd800) << 10) + (lo - 0xdc00)
                    } else {
                        return Err(JsonError::InvalidEscape(esc_at));
                    }
                } else if (0xdc00..0xe000).contains(&hi) {
                    return Err(JsonError::InvalidEscape(esc_at));
                } else {
                    hi
                };
                let ch = char::from_u32(code).ok_or(JsonError::InvalidEscape(esc_at))?;
                let mut utf8 = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
            }
            _ => return Err(JsonError::InvalidEscape(esc_at)),
        }
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u32, JsonError> {
        let mut value = 0u32;
        for _ in 0..4 {
            let Some(&b) = self.data.get(self.x) else {
                return Err(JsonError::Eof);
            };
            let digit = (b as char)
                .to_digit(16)
                .ok_or(JsonError::InvalidEscape(self.x))?;
            value = value * 16 + digit;
            self.x += 1;
        }
        Ok(value)
    }

    fn read_arr(&mut self) -> Result<JsonValue, JsonError> {
        self.x += 1; // past '['
        let mut items = JsonArray::new();
        self.skip_whitespace();
        if self.data.get(self.x) == Some(&b']') {
            self.x += 1;
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.append(self.read_any()?);
            self.skip_whitespace();
            match self.data.get(self.x) {
                Some(b',') => self.x += 1,
                Some(b']') => {
                    self.x += 1;
                    return Ok(JsonValue::Array(items));
                }
                _ => return Err(self.err_here()),
            }
        }
    }

    fn read_obj(&mut self) -> Result<JsonValue, JsonError> {
        self.x += 1; // past '{'
        let mut members = JsonObject::new();
        self.skip_whitespace();
        if self.data.get(self.x) == Some(&b'}') {
            self.x += 1;
            return Ok(JsonValue::Object(members));
        }
        loop {
            self.skip_whitespace();
            let key = self.read_str()?;
            self.skip_whitespace();
            if self.data.get(self.x) != Some(&b':') {
                return Err(self.err_here());
            }
            self.x += 1;
            let value = self.read_any()?;
            // Duplicate keys follow the map's upsert rule: last wins.
            members.insert(key, value);
            self.skip_whitespace();
            match self.data.get(self.x) {
                Some(b',') => self.x += 1,
                Some(b'}') => {
                    self.x += 1;
                    return Ok(JsonValue::Object(members));
                }
                _ => return Err(self.err_here()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert!(parse("null").unwrap().is_null());
        assert_eq!(parse("true").unwrap().as_bool(), Some(true));
        assert_eq!(parse("false").unwrap().as_bool(), Some(false));
        assert_eq!(parse("123.45").unwrap().as_f64(), Some(123.45));
        assert_eq!(parse("-1e3").unwrap().as_f64(), Some(-1000.0));
        assert_eq!(parse("\"hello\"").unwrap().as_str(), Some("hello"));
    }

    #[test]
    fn whitespace_around_value() {
        assert_eq!(parse("  \n\t 42 \r\n").unwrap().as_f64(), Some(42.0));
    }

    #[test]
    fn arrays() {
        let v = parse("[1, 2, 3]").unwrap();
        let arr = v.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(1).and_then(JsonValue::as_f64), Some(2.0));
        assert_eq!(parse("[]").unwrap().as_array().unwrap().len(), 0);
    }

    #[test]
    fn objects_are_key_ordered() {
        let v = parse(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let obj = v.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_keys_last_wins() {
        let v = parse(r#"{"k": 1, "k": 2}"#).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(v.get("k").and_then(JsonValue::as_f64), Some(2.0));
    }

    #[test]
    fn nested_structures() {
        let v = parse(r#"{"xs": [{"deep": null}], "n": -0.5}"#).unwrap();
        assert!(v
            .get("xs")
            .and_then(|xs| xs.at(0))
            .and_then(|o| o.get("deep"))
            .is_some_and(JsonValue::is_null));
        assert_eq!(v.get("n").and_then(JsonValue::as_f64), Some(-0.5));
    }

    #[test]
    fn escapes_decode() {
        assert_eq!(
            parse(r#""a\"b\\c\/d\ne\tf""#).unwrap().as_str(),
            Some("a\"b\\c/d\ne\tf")
        );
        assert_eq!(parse(r#""é""#).unwrap().as_str(), Some("\u{e9}"));
        // Surrogate pair.
        assert_eq!(parse(r#""😀""#).unwrap().as_str(), Some("\u{1f600}"));
    }

    #[test]
    fn malformed_input_reports_offsets() {
        assert_eq!(parse(""), Err(JsonError::Eof));
        assert_eq!(parse("{"), Err(JsonError::Eof));
        assert_eq!(parse("@"), Err(JsonError::Invalid(0)));
        assert_eq!(parse("[1, ]"), Err(JsonError::Invalid(4)));
        assert_eq!(parse(r#"{"a" 1}"#), Err(JsonError::Invalid(5)));
        assert_eq!(parse("1 2"), Err(JsonError::TrailingInput(2)));
        assert_eq!(parse(r#""\q""#), Err(JsonError::InvalidEscape(1)));
        assert_eq!(parse("-"), Err(JsonError::InvalidNumber(0)));
        assert_eq!(parse("1."), Err(JsonError::InvalidNumber(0)));
        // Lone high surrogate.
        assert!(matches!(parse(r#""\ud800""#), Err(JsonError::InvalidEscape(_))));
    }

    #[test]
    fn truncated_literals_fail() {
        assert_eq!(parse("tru"), Err(JsonError::Invalid(0)));
        assert_eq!(parse("nul"), Err(JsonError::Invalid(0)));
    }
}
