//! # Directive Recognizer
//!
//! Decides whether the documentation block of a type declaration asks for a
//! constructor, and which modes it requests.
//!
//! A block requests generation when one of its `//` line comments is a
//! `//go:generate` command naming the `newc` generator, in any of the usual
//! spellings:
//!
//! ```text
//! //go:generate newc --init
//! //go:generate go run ../../../newc --value
//! //go:generate go run github.com/someone/newc@latest
//! ```
//!
//! Mode flags are then read according to [`FlagMatching`]. The default,
//! [`FlagMatching::Substring`], flips `init`/`value` mode whenever the words
//! occur anywhere in the comment block, prose included. That coarse behavior is
//! the observable contract of existing users and is kept as the default;
//! [`FlagMatching::Strict`] only looks at the directive's own arguments.

use serde::{Deserialize, Serialize};

/// Name the directive must reference
pub const GENERATOR_NAME: &str = "newc";

const GO_GENERATE_PREFIX: &str = "//go:generate";

/// How mode flags are read from a documentation block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagMatching {
    /// Any occurrence of `init` / `value` in the whole block
    #[default]
    Substring,
    /// Only `--init` / `--value` arguments on the directive line
    Strict,
}

/// Generation request recovered from a documentation block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directive {
    /// Call the type's `init` method after construction
    pub init_mode: bool,
    /// Return the struct by value instead of by pointer
    pub value_mode: bool,
}

/// Recognize a generation directive in a documentation block.
///
/// `comments` holds the text of each comment of the block, in order. Only a
/// `//` line comment can be the directive; a `/* */` block comment never is,
/// whatever its inner lines say. Returns `None` when no comment of the block
/// is a `newc` directive.
pub fn recognize(comments: &[&str], matching: FlagMatching) -> Option<Directive> {
    let line = comments
        .iter()
        .copied()
        .find(|c| c.trim_start().starts_with("//") && is_directive_line(c))?;

    let directive = match matching {
        FlagMatching::Substring => Directive {
            init_mode: comments.iter().any(|c| c.contains("init")),
            value_mode: comments.iter().any(|c| c.contains("value")),
        },
        FlagMatching::Strict => {
            let args = directive_args(line);
            Directive {
                init_mode: args.iter().any(|a| is_flag(a, "init")),
                value_mode: args.iter().any(|a| is_flag(a, "value")),
            }
        }
    };
    Some(directive)
}

/// Whether `line` is a `//go:generate` command invoking `newc`
pub fn is_directive_line(line: &str) -> bool {
    command_tokens(line).is_some_and(|mut tokens| tokens.any(names_generator))
}

fn command_tokens(line: &str) -> Option<std::str::SplitWhitespace<'_>> {
    let command = line.trim().strip_prefix(GO_GENERATE_PREFIX)?;
    // `//go:generatefoo` is not a go:generate line
    if !command.is_empty() && !command.starts_with(char::is_whitespace) {
        return None;
    }
    Some(command.split_whitespace())
}

/// Arguments following the generator token on a directive line
fn directive_args(line: &str) -> Vec<&str> {
    command_tokens(line)
        .map(|tokens| tokens.skip_while(|t| !names_generator(t)).skip(1).collect())
        .unwrap_or_default()
}

fn names_generator(token: &str) -> bool {
    let without_version = token.split('@').next().unwrap_or(token);
    let last = without_version
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(without_version);
    last == GENERATOR_NAME
}

fn is_flag(arg: &str, name: &str) -> bool {
    let bare = arg.trim_start_matches('-');
    bare.len() < arg.len() && bare.split('=').next() == Some(name)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn block(doc: &str) -> Vec<&str> {
        doc.lines().collect()
    }

    #[test]
    fn test_directive_line_spellings() {
        assert!(is_directive_line("//go:generate newc"));
        assert!(is_directive_line("  //go:generate newc --init"));
        assert!(is_directive_line("//go:generate go run ../../../newc --value"));
        assert!(is_directive_line(
            "//go:generate go run github.com/someone/newc@v1.2.0"
        ));
    }

    #[test]
    fn test_non_directive_lines() {
        assert!(!is_directive_line("// newc"));
        assert!(!is_directive_line("//go:generate stringer -type=Kind"));
        assert!(!is_directive_line("//go:generate go run ./newcfoo"));
        assert!(!is_directive_line("//go:generatenewc"));
        assert!(!is_directive_line("// go:generate newc"));
    }

    #[test]
    fn test_block_without_directive_is_skipped() {
        let doc = "// Foo has an init value\n// nothing to generate";
        assert_eq!(recognize(&block(doc), FlagMatching::Substring), None);
        assert_eq!(recognize(&block(doc), FlagMatching::Strict), None);
    }

    #[test]
    fn test_plain_directive_has_no_modes() {
        let doc = "// StructRef ...\n//go:generate go run ../../../newc";
        assert_eq!(
            recognize(&block(doc), FlagMatching::Substring),
            Some(Directive::default())
        );
    }

    #[test]
    fn test_flag_order_does_not_matter() {
        let a = recognize(&["//go:generate newc --init --value"], FlagMatching::Substring);
        let b = recognize(&["//go:generate newc --value --init"], FlagMatching::Substring);
        let both = Some(Directive {
            init_mode: true,
            value_mode: true,
        });
        assert_eq!(a, both);
        assert_eq!(b, both);
    }

    #[test]
    fn test_substring_matching_reads_whole_block() {
        // prose on another line flips the flag
        let doc = "// Cache keeps the initial value around\n//go:generate newc";
        assert_eq!(
            recognize(&block(doc), FlagMatching::Substring),
            Some(Directive {
                init_mode: true,
                value_mode: true,
            })
        );
    }

    #[test]
    fn test_strict_matching_reads_directive_args_only() {
        let doc = "// Cache keeps the initial value around\n//go:generate newc";
        assert_eq!(
            recognize(&block(doc), FlagMatching::Strict),
            Some(Directive::default())
        );

        let doc = "// Cache\n//go:generate go run ../newc -init --value";
        assert_eq!(
            recognize(&block(doc), FlagMatching::Strict),
            Some(Directive {
                init_mode: true,
                value_mode: true,
            })
        );
    }

    #[test]
    fn test_block_comment_is_never_a_directive() {
        let comments = ["/*\n//go:generate newc --init\n*/"];
        assert_eq!(recognize(&comments, FlagMatching::Substring), None);
        assert_eq!(recognize(&comments, FlagMatching::Strict), None);
    }

    #[test]
    fn test_block_comment_still_feeds_substring_flags() {
        let comments = ["/* keeps an initial cache */", "//go:generate newc"];
        assert_eq!(
            recognize(&comments, FlagMatching::Substring),
            Some(Directive {
                init_mode: true,
                value_mode: false,
            })
        );
    }

    #[test]
    fn test_flag_matching_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            matching: FlagMatching,
        }
        let w: Wrapper = toml::from_str("matching = \"strict\"").unwrap();
        assert_eq!(w.matching, FlagMatching::Strict);
    }
}
