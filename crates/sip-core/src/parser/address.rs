// To / From header value grammar (RFC 3261 Section 20.20 / 20.39):
//
// ( name-addr / addr-spec ) *( SEMI to-param )
// name-addr    = [ display-name ] LAQUOT addr-spec RAQUOT
// display-name = *(token LWS) / quoted-string

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{anychar, char, none_of, space0, space1},
    combinator::{map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use super::uri::{parse_uri, parse_uri_no_params};
use super::ParseResult;
use crate::types::address::Address;
use crate::types::method::is_token_char;
use crate::types::param::Param;

fn is_token(c: char) -> bool {
    c.is_ascii() && is_token_char(c as u8)
}

// gen-value = token / host / quoted-string
fn is_gen_value_char(c: char) -> bool {
    is_token(c) || matches!(c, ':' | '[' | ']')
}

fn quoted_string(input: &str) -> ParseResult<String> {
    map(
        delimited(
            char('"'),
            many0(alt((preceded(char('\\'), anychar), none_of("\\\"")))),
            char('"'),
        ),
        |chars: Vec<char>| chars.into_iter().collect(),
    )(input)
}

fn quoted_raw(input: &str) -> ParseResult<&str> {
    recognize(quoted_string)(input)
}

fn token_words(input: &str) -> ParseResult<String> {
    map(
        recognize(separated_list1(space1, take_while1(is_token))),
        str::to_string,
    )(input)
}

fn display_name(input: &str) -> ParseResult<String> {
    terminated(alt((quoted_string, token_words)), space0)(input)
}

fn header_param(input: &str) -> ParseResult<Param> {
    map(
        pair(
            take_while1(is_token),
            opt(preceded(
                tuple((space0, char('='), space0)),
                alt((quoted_raw, take_while1(is_gen_value_char))),
            )),
        ),
        |(name, value): (&str, Option<&str>)| Param::new(name, value),
    )(input)
}

fn header_params(input: &str) -> ParseResult<Vec<Param>> {
    many0(preceded(tuple((space0, char(';'), space0)), header_param))(input)
}

fn name_addr(input: &str) -> ParseResult<Address> {
    let (input, display_name) = opt(display_name)(input)?;
    let (input, uri) = delimited(char('<'), parse_uri, char('>'))(input)?;
    let (input, params) = header_params(input)?;
    Ok((
        input,
        Address {
            display_name: display_name.filter(|d| !d.is_empty()),
            uri,
            params,
        },
    ))
}

fn addr_spec(input: &str) -> ParseResult<Address> {
    let (input, uri) = parse_uri_no_params(input)?;
    let (input, params) = header_params(input)?;
    Ok((
        input,
        Address {
            display_name: None,
            uri,
            params,
        },
    ))
}

/// Parse a To/From style header value.
pub fn parse_address(input: &str) -> ParseResult<Address> {
    delimited(space0, alt((addr_spec, name_addr)), space0)(input)
}
