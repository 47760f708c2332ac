// URI grammar subset from RFC 3261 Section 25.1 and RFC 3966.
//
// SIP-URI  = "sip:" [ userinfo ] hostport uri-parameters [ headers ]
// userinfo = ( user / telephone-subscriber ) [ ":" password ] "@"
// TEL-URI  = "tel:" telephone-subscriber *( ";" par )

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{alpha1, char, digit1},
    combinator::{map, map_res, opt, recognize},
    multi::{many0, many1},
    sequence::{pair, preceded, terminated},
};

use super::{pct_encoded, ParseResult};
use crate::types::param::Param;
use crate::types::uri::{Scheme, Uri};

// unreserved = alphanum / mark
pub(crate) fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
}

// user-unreserved = "&" / "=" / "+" / "$" / "," / ";" / "?" / "/"
fn is_user_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, '&' | '=' | '+' | '$' | ',' | ';' | '?' | '/')
}

fn is_password_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, '&' | '=' | '+' | '$' | ',')
}

// param-unreserved = "[" / "]" / "/" / ":" / "&" / "+" / "$"
fn is_param_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, '[' | ']' | '/' | ':' | '&' | '+' | '$')
}

// hnv-unreserved plus the "=" and "&" separators; kept raw
fn is_header_char(c: char) -> bool {
    is_unreserved(c) || matches!(c, '[' | ']' | '/' | '?' | ':' | '+' | '$' | '=' | '&' | '%')
}

fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

fn is_ipv6_char(c: char) -> bool {
    c.is_ascii_hexdigit() || c == ':' || c == '.'
}

// visual-separator and digits of a telephone-subscriber
fn is_tel_char(c: char) -> bool {
    c.is_ascii_hexdigit() || matches!(c, '+' | '-' | '.' | '(' | ')' | '*' | '#')
}

fn escaped_run<'a>(pred: fn(char) -> bool) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
    recognize(many1(alt((take_while1(pred), pct_encoded))))
}

fn scheme(input: &str) -> ParseResult<Scheme> {
    map_res(terminated(alpha1, char(':')), |s: &str| s.parse::<Scheme>())(input)
}

fn userinfo(input: &str) -> ParseResult<(&str, Option<&str>)> {
    terminated(
        pair(
            escaped_run(is_user_char),
            opt(preceded(char(':'), escaped_run(is_password_char))),
        ),
        char('@'),
    )(input)
}

// IPv6reference keeps its brackets so the host text stays as written
fn host(input: &str) -> ParseResult<&str> {
    alt((
        recognize(pair(char('['), terminated(take_while1(is_ipv6_char), char(']')))),
        take_while1(is_hostname_char),
    ))(input)
}

fn port(input: &str) -> ParseResult<u16> {
    preceded(char(':'), map_res(digit1, |d: &str| d.parse::<u16>()))(input)
}

fn uri_param(input: &str) -> ParseResult<Param> {
    map(
        pair(
            escaped_run(is_param_char),
            opt(preceded(char('='), escaped_run(is_param_char))),
        ),
        |(name, value): (&str, Option<&str>)| Param::new(name, value),
    )(input)
}

fn uri_params(input: &str) -> ParseResult<Vec<Param>> {
    many0(preceded(char(';'), uri_param))(input)
}

fn uri_headers(input: &str) -> ParseResult<&str> {
    preceded(char('?'), take_while1(is_header_char))(input)
}

fn tel_body(input: &str) -> ParseResult<Uri> {
    let (input, number) = take_while1(is_tel_char)(input)?;
    let (input, parameters) = uri_params(input)?;
    let mut uri = Uri::tel(number);
    uri.parameters = parameters;
    Ok((input, uri))
}

fn sip_body(input: &str, scheme: Scheme, with_params: bool) -> ParseResult<Uri> {
    let (input, userinfo) = opt(userinfo)(input)?;
    let (input, host) = host(input)?;
    let (input, port) = opt(port)(input)?;
    let (input, parameters) = if with_params {
        uri_params(input)?
    } else {
        (input, Vec::new())
    };
    let (input, headers) = if with_params {
        opt(uri_headers)(input)?
    } else {
        (input, None)
    };

    let (user, password) = match userinfo {
        Some((user, password)) => (Some(user.to_string()), password.map(str::to_string)),
        None => (None, None),
    };

    Ok((
        input,
        Uri {
            scheme,
            user,
            password,
            host: Some(host.to_string()),
            port,
            parameters,
            headers: headers.map(str::to_string),
        },
    ))
}

fn uri_with(input: &str, with_params: bool) -> ParseResult<Uri> {
    let (input, scheme) = scheme(input)?;
    match scheme {
        Scheme::Tel if with_params => tel_body(input),
        Scheme::Tel => {
            let (input, number) = take_while1(is_tel_char)(input)?;
            Ok((input, Uri::tel(number)))
        }
        other => sip_body(input, other, with_params),
    }
}

/// Parse a complete URI including parameters and headers.
pub fn parse_uri(input: &str) -> ParseResult<Uri> {
    uri_with(input, true)
}

/// Parse a URI in addr-spec position of a header value, where any `;`
/// that follows belongs to the header rather than the URI.
pub fn parse_uri_no_params(input: &str) -> ParseResult<Uri> {
    uri_with(input, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_userinfo_is_optional() {
        let (rest, uri) = parse_uri("sip:example.com;lr").unwrap();
        assert_eq!(rest, "");
        assert_eq!(uri.user(), None);
        assert_eq!(uri.host(), Some("example.com"));
        assert_eq!(uri.parameters, vec![Param::flag("lr")]);
    }

    #[test]
    fn test_escaped_user() {
        let (_, uri) = parse_uri("sip:alice%20smith@example.com").unwrap();
        assert_eq!(uri.user(), Some("alice%20smith"));
    }

    #[test]
    fn test_no_params_stops_at_semicolon() {
        let (rest, uri) = parse_uri_no_params("sip:bob@example.com;tag=abc").unwrap();
        assert_eq!(rest, ";tag=abc");
        assert!(uri.parameters.is_empty());
    }

    #[test]
    fn test_unknown_scheme_fails() {
        assert!(parse_uri("http://example.com").is_err());
    }
}
