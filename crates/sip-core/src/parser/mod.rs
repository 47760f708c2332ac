//! nom parsers for the SIP identity values

pub mod address;
pub mod uri;

use nom::{
    character::complete::{char, satisfy},
    combinator::recognize,
    sequence::tuple,
    IResult,
};

// Type alias for parser result
pub type ParseResult<'a, O> = IResult<&'a str, O>;

pub use address::parse_address;
pub use uri::{parse_uri, parse_uri_no_params};

// escaped = "%" HEXDIG HEXDIG
pub(crate) fn pct_encoded(input: &str) -> ParseResult<&str> {
    recognize(tuple((
        char('%'),
        satisfy(|c| c.is_ascii_hexdigit()),
        satisfy(|c| c.is_ascii_hexdigit()),
    )))(input)
}
