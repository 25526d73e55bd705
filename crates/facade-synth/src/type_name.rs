//! Type reference handling.
//!
//! Type references arrive as source text (`System.Collections.Generic.List<string>`).
//! They are split into path tokens and punctuation so two operations can work on
//! the paths alone: qualifying them for emission and normalizing them into
//! overlap keys.

const GLOBAL_PREFIX: &str = "global::";

/// Keyword aliases and the framework types they stand for.
const KEYWORD_ALIASES: &[(&str, &str)] = &[
    ("bool", "System.Boolean"),
    ("byte", "System.Byte"),
    ("sbyte", "System.SByte"),
    ("char", "System.Char"),
    ("decimal", "System.Decimal"),
    ("double", "System.Double"),
    ("float", "System.Single"),
    ("int", "System.Int32"),
    ("uint", "System.UInt32"),
    ("nint", "System.IntPtr"),
    ("nuint", "System.UIntPtr"),
    ("long", "System.Int64"),
    ("ulong", "System.UInt64"),
    ("short", "System.Int16"),
    ("ushort", "System.UInt16"),
    ("object", "System.Object"),
    ("string", "System.String"),
    ("void", "System.Void"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Path(&'a str),
    Space(&'a str),
    Punct(char),
}

fn is_path_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '@' | '.' | ':')
}

fn tokenize(ty: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = ty.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        if is_path_char(ch) {
            let mut end = start + ch.len_utf8();
            while let Some(&(i, c)) = chars.peek() {
                if !is_path_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            tokens.push(Token::Path(&ty[start..end]));
        } else if ch.is_whitespace() {
            let mut end = start + ch.len_utf8();
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            tokens.push(Token::Space(&ty[start..end]));
        } else {
            tokens.push(Token::Punct(ch));
        }
    }

    tokens
}

fn keyword_alias(path: &str) -> Option<&'static str> {
    KEYWORD_ALIASES
        .iter()
        .find(|(keyword, _)| *keyword == path)
        .map(|(_, framework)| *framework)
}

/// Prefix every dotted type path with `global::` so the reference cannot be
/// captured by a same-named namespace or type at the emission site.
///
/// Keywords, generic parameters and simple names are left alone, as is
/// everything between the paths.
pub fn qualify(ty: &str, type_parameters: &[&str]) -> String {
    let mut out = String::with_capacity(ty.len() + GLOBAL_PREFIX.len());
    let mut previous = None;

    for token in tokenize(ty.trim()) {
        match token {
            Token::Path(path) => {
                // `List<int>.Enumerator`: the tail names a nested type, not a root.
                let is_nested_tail = path.starts_with('.') || previous == Some('>');
                let needs_prefix = path.contains('.')
                    && !is_nested_tail
                    && !path.starts_with(GLOBAL_PREFIX)
                    && keyword_alias(path).is_none()
                    && !type_parameters.contains(&path);
                if needs_prefix {
                    out.push_str(GLOBAL_PREFIX);
                }
                out.push_str(path);
                previous = None;
            }
            Token::Space(space) => out.push_str(space),
            Token::Punct(ch) => {
                out.push(ch);
                previous = Some(ch);
            }
        }
    }

    out
}

/// Canonical spelling of a type reference for overlap comparison.
///
/// Drops whitespace and `global::`, maps keyword aliases to framework names
/// and drops tuple element names, so `(int count, string)` and
/// `(global::System.Int32, System.String)` compare equal.
pub fn normalize(ty: &str) -> String {
    let mut out = String::with_capacity(ty.len());
    let mut previous_was_path = false;

    for token in tokenize(ty.trim()) {
        match token {
            Token::Path(path) => {
                // A path directly after a path is a tuple element name.
                if previous_was_path {
                    continue;
                }
                let path = path.strip_prefix(GLOBAL_PREFIX).unwrap_or(path);
                out.push_str(keyword_alias(path).unwrap_or(path));
                previous_was_path = true;
            }
            Token::Space(_) => {}
            Token::Punct(ch) => {
                out.push(ch);
                previous_was_path = false;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualify_dotted_paths() {
        assert_eq!(
            qualify("System.Threading.Tasks.Task<bool>", &[]),
            "global::System.Threading.Tasks.Task<bool>"
        );
        assert_eq!(
            qualify("System.Collections.Generic.Dictionary<string, Shop.Item>", &[]),
            "global::System.Collections.Generic.Dictionary<string, global::Shop.Item>"
        );
    }

    #[test]
    fn test_qualify_nested_type_of_generic() {
        assert_eq!(
            qualify("System.Collections.Generic.List<int>.Enumerator", &[]),
            "global::System.Collections.Generic.List<int>.Enumerator"
        );
        assert_eq!(
            qualify("System.Collections.Generic.Dictionary<TKey, Shop.Item>.KeyCollection", &["TKey"]),
            "global::System.Collections.Generic.Dictionary<TKey, global::Shop.Item>.KeyCollection"
        );
    }

    #[test]
    fn test_qualify_leaves_keywords_and_parameters() {
        assert_eq!(qualify("int", &[]), "int");
        assert_eq!(qualify("T1", &["T1"]), "T1");
        assert_eq!(qualify("Account", &[]), "Account");
        assert_eq!(
            qualify("global::System.Exception?", &[]),
            "global::System.Exception?"
        );
        assert_eq!(qualify("  int[] ", &[]), "int[]");
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize("string"), "System.String");
        assert_eq!(normalize("global::System.String"), "System.String");
        assert_eq!(normalize("System.String"), "System.String");
        assert_eq!(
            normalize("Dictionary< string ,int >"),
            "Dictionary<System.String,System.Int32>"
        );
    }

    #[test]
    fn test_normalize_tuple_names() {
        assert_eq!(
            normalize("(int count, string name)"),
            normalize("(global::System.Int32, System.String)")
        );
    }

    #[test]
    fn test_normalize_keeps_nullable_value_types_distinct() {
        assert_ne!(normalize("int?"), normalize("int"));
    }
}
