use std::io;

use http1_parser::{HttpCompliance, HttpParser, HttpParserConfig, State};

mod common;
use common::{eof, init_logger, parse_all, parse_request, parse_response, Event, Recorder};

fn assert_single_failure(r: &Recorder, input: &str) {
    assert_eq!(
        r.events
            .iter()
            .filter(|e| matches!(e, Event::BadMessage(_)))
            .count(),
        1,
        "{input:?}"
    );
    assert_eq!(r.count(&Event::MessageComplete), 0, "{input:?}");
    assert!(r.count(&Event::EarlyEof) <= 1, "{input:?}");
}

#[test]
fn request_failures() -> io::Result<()> {
    for (input, reason) in [
        ("GET\r\n", "No URI"),
        ("GET \r\n", "No URI"),
        ("GET / HPPT/7.7\r\n", "Unknown Version"),
        ("GET / HTTP/1.01\r\n", "Unknown Version"),
        ("GET / HTTP/0.9\r\n", "Bad Version"),
        ("GET / HTTP/2.0\r\n\r\n", "Unknown Version"),
        ("GET / HTTP/1.0\r\nContent-Length: abc\r\n\r\n", "Invalid Content-Length Value"),
        ("GET / HTTP/1.0\r\nContent-Length: 1.5\r\n\r\n", "Invalid Content-Length Value"),
        ("GET / HTTP/1.0\r\nContent-Length: -1\r\n\r\n", "Invalid Content-Length Value"),
        (
            "GET / HTTP/1.0\r\nContent-Length: 99999999999999999999\r\n\r\n",
            "Invalid Content-Length Value",
        ),
        ("GET / HTTP/1.0\r\nContent-Length:\r\n\r\n", "Invalid Content-Length Value"),
        ("GET / HTTP/1.0\r\nHost: x\r\n  \r\n", "Header Folding"),
    ] {
        let mut p = HttpParser::request(Recorder::default());
        parse_all(&mut p, input.as_bytes());
        assert!(p.is_state(State::Close), "{input:?}");
        eof(&mut p);
        assert!(p.is_state(State::Closed), "{input:?}");

        let r = p.into_handler();
        assert_eq!(r.bad_reason().as_deref(), Some(reason), "{input:?}");
        assert_single_failure(&r, input);
    }

    Ok(())
}

#[test]
fn illegal_characters() -> io::Result<()> {
    let cases: [(&[u8], &str); 8] = [
        (b"G\xe6T / HTTP/1.0\r\n\r\n", "Illegal character OTEXT=0xe6"),
        (b"GET / HTTP/1.\xe6\r\n\r\n", "Unknown Version"),
        (b"GET / HTTP/1.0\r\nH\xe6st: value\r\n\r\n", "Illegal character OTEXT=0xe6"),
        (b"GET / HTTP/1.0\r\nName: val\x01ue\r\n\r\n", "Illegal character CNTL=0x1"),
        (b"GET / HTTP/1.0\r\nName: value\x7f\r\n\r\n", "Illegal character CNTL=0x7f"),
        (b"GET / HTTP/1.0\r\nName: value\rOther: x\r\n\r\n", "Bad EOL"),
        (b"GET / HTTP/1.0\r\n\tName: value\r\n\r\n", "Illegal character HTAB=0x9"),
        (b"GET /\x00 HTTP/1.0\r\n\r\n", "Illegal character CNTL=0x0"),
    ];

    for (input, reason) in cases {
        let r = parse_request(HttpCompliance::default(), input);
        let shown = String::from_utf8_lossy(input);
        assert_eq!(r.bad_reason().as_deref(), Some(reason), "{shown:?}");
        assert_single_failure(&r, &shown);
    }

    Ok(())
}

#[test]
fn bad_field_names() -> io::Result<()> {
    for name in [
        "Foo\\Bar", "Foo@Bar", "Foo,Bar", "Foo}Bar", "Foo{Bar", "Foo=Bar", "Foo>Bar", "Foo<Bar",
        "Foo)Bar", "Foo(Bar", "Foo?Bar", "Foo\"Bar", "Foo/Bar", "Foo]Bar", "Foo[Bar",
    ] {
        let input = format!("GET / HTTP/1.1\r\nHost: localhost\r\n{}: value\r\n\r\n", name);
        let r = parse_request(HttpCompliance::default(), input.as_bytes());
        let reason = r.bad_reason().unwrap_or_default();
        assert!(reason.starts_with("Illegal character"), "{name}: {reason}");
        assert_eq!(r.fields.len(), 1, "{name}");
        assert_single_failure(&r, &input);
    }

    Ok(())
}

#[test]
fn failure_stops_events() -> io::Result<()> {
    let mut p = HttpParser::request(Recorder::default());
    let mut buf = &b"GET / HTTP/1.0\r\nName: value\r\nBad Name: value\r\nOther: value\r\n\r\n"[..];

    assert!(p.parse_next(&mut buf));
    assert!(buf.is_empty());
    assert!(p.is_state(State::Close));

    assert!(!p.parse_next(&mut &b"GET / HTTP/1.0\r\n\r\n"[..]));
    p.reset();
    assert!(p.is_state(State::Close));

    eof(&mut p);
    let r = p.into_handler();
    assert_eq!(r.headers(), vec![("Name".to_owned(), "value".to_owned())]);
    assert_eq!(r.events.last(), Some(&Event::BadMessage("Illegal character SPACE=' '".into())));
    assert_single_failure(&r, "bad name");

    Ok(())
}

#[test]
fn head_size_limits() -> io::Result<()> {
    init_logger();

    let mut config = HttpParserConfig::default();
    config.set_headers_max_len(64);

    let long_value = "x".repeat(100);
    let input = format!("GET / HTTP/1.0\r\nName: {}\r\n\r\n", long_value);
    let mut p = HttpParser::request_with_config(Recorder::default(), config.clone());
    parse_all(&mut p, input.as_bytes());
    let r = p.into_handler();
    assert_eq!(r.bad_reason().as_deref(), Some("Header too large"));
    assert_eq!(r.failure.as_ref().map(|f| f.status().as_u16()), Some(431));

    let input = format!("GET /{} HTTP/1.0\r\n\r\n", long_value);
    let mut p = HttpParser::request_with_config(Recorder::default(), config.clone());
    parse_all(&mut p, input.as_bytes());
    let r = p.into_handler();
    assert_eq!(r.bad_reason().as_deref(), Some("URI Too Long"));
    assert_eq!(r.failure.as_ref().map(|f| f.status().as_u16()), Some(414));

    // the limit applies to trailers too
    let input = format!(
        "POST / HTTP/1.0\r\nTransfer-Encoding: chunked\r\n\r\n0\r\nTrailer: {}\r\n\r\n",
        long_value
    );
    let mut p = HttpParser::request_with_config(Recorder::default(), config.clone());
    parse_all(&mut p, input.as_bytes());
    assert_eq!(p.handler().bad_reason().as_deref(), Some("Header too large"));

    // body bytes are not counted
    let input = format!("POST / HTTP/1.0\r\nContent-Length: 100\r\n\r\n{}", long_value);
    let mut p = HttpParser::request_with_config(Recorder::default(), config.clone());
    parse_all(&mut p, input.as_bytes());
    assert!(p.handler().failure.is_none());
    assert_eq!(p.handler().content().len(), 100);

    config.set_headers_max_len(0);
    let input = format!("GET / HTTP/1.0\r\nName: {}\r\n\r\n", "y".repeat(3_000));
    let mut p = HttpParser::request_with_config(Recorder::default(), config);
    parse_all(&mut p, input.as_bytes());
    assert!(p.handler().failure.is_none());

    Ok(())
}

#[test]
fn token_limit() -> io::Result<()> {
    let mut config = HttpParserConfig::default();
    config.set_token_max_len(8).set_headers_max_len(0);

    let mut p = HttpParser::request_with_config(Recorder::default(), config.clone());
    parse_all(&mut p, b"GET / HTTP/1.0\r\nName: 0123456789\r\n\r\n");
    assert_eq!(p.handler().bad_reason().as_deref(), Some("Header too large"));

    let mut p = HttpParser::request_with_config(Recorder::default(), config);
    parse_all(&mut p, b"GET /0123456789 HTTP/1.0\r\n\r\n");
    assert_eq!(p.handler().bad_reason().as_deref(), Some("URI Too Long"));

    Ok(())
}

#[test]
fn early_eof() -> io::Result<()> {
    for input in [
        "GET / HTTP/1.0\r\n",
        "GET / HTTP/1.0\r\nName: value",
        "GET / HTT",
        "POST / HTTP/1.0\r\nContent-Length: 10\r\n\r\n01234",
    ] {
        let mut p = HttpParser::request(Recorder::default());
        parse_all(&mut p, input.as_bytes());
        eof(&mut p);
        assert!(p.is_state(State::Closed), "{input:?}");

        let r = p.into_handler();
        assert_eq!(r.events.last(), Some(&Event::EarlyEof), "{input:?}");
        assert_eq!(r.count(&Event::EarlyEof), 1, "{input:?}");
        assert_eq!(r.count(&Event::MessageComplete), 0, "{input:?}");
        assert!(r.failure.is_none(), "{input:?}");
    }

    let r = parse_response(HttpCompliance::default(), b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n012");
    assert_eq!(r.content(), b"012");
    assert_eq!(r.count(&Event::MessageComplete), 0);

    Ok(())
}
