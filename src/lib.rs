//! jsz: a zero-copy JSON parser on a chunked bump arena.
//!
//! The two halves are co-designed: the parser allocates one small node per
//! grammatical production and wants O(1) allocation with a single-call
//! reset, which is exactly what the [`arena`] provides; the arena in turn
//! relies on the parser's nodes being uniformly small and aligned so the
//! bump fast path stays a handful of instructions. Scanning is accelerated
//! with SWAR: whitespace, digit runs, and string boundaries are located
//! eight bytes at a time with plain integer arithmetic (see [`swar`]).
//!
//! String and number values are *views* into the input buffer: no bytes
//! are copied and escape sequences are preserved verbatim, so the input
//! must stay alive (and unmodified) for as long as the tree is used. The
//! borrow checker enforces both that and the arena-reset contract.
//!
//! # Example
//!
//! ```
//! use jsz::{Arena, NodeType, Parser};
//!
//! let arena = Arena::new();
//! let input = br#"{"name":"jsz","fast":true,"sizes":[1,2,3]}"#;
//!
//! let root = Parser::new(input, &arena).parse_any().unwrap();
//! assert_eq!(root.node_type(), NodeType::Object);
//!
//! let mut members = root.children();
//! let name = members.next().unwrap();
//! assert_eq!(name.key(), b"name");
//! assert_eq!(name.value(), b"jsz");
//!
//! let fast = members.next().unwrap();
//! assert_eq!(fast.node_type(), NodeType::True);
//!
//! let sizes = members.next().unwrap();
//! let elements: Vec<&[u8]> = sizes.children().map(|n| n.value()).collect();
//! assert_eq!(elements, [b"1", b"2", b"3"]);
//! ```
//!
//! # Input language
//!
//! A subset of RFC 8259: objects, arrays, strings (raw, escape-preserving),
//! integer-style numbers (no `.`/`e`/`E`/`+`), and the `true`/`false`/
//! `null` literals. One top-level value; trailing bytes are ignored. UTF-8
//! is assumed but not validated.

pub mod arena;
pub mod node;
pub mod parser;
pub mod swar;

pub use arena::Arena;
pub use node::{Children, Node, NodeType};
pub use parser::{ParseError, ParseErrorKind, Parser};
