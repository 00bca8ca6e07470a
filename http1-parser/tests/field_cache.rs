use std::{io, sync::Arc};

use http1_parser::{
    http::header::{CONNECTION, HOST},
    HttpCompliance, HttpParser,
};

mod common;
use common::{init_logger, parse_all, request_parser, Recorder};

const TWO_REQUESTS: &[u8] = b"GET /a HTTP/1.1\r\n\
    Host: localhost\r\n\
    Connection: close\r\n\
    X-Trace: 1\r\n\
    \r\n\
    GET /b HTTP/1.1\r\n\
    Host: localhost\r\n\
    Connection: close\r\n\
    X-Trace: 1\r\n\
    \r\n";

#[test]
fn repeated_fields_are_shared() -> io::Result<()> {
    let mut p = request_parser(HttpCompliance::default());
    parse_all(&mut p, TWO_REQUESTS);

    let cached = p.field_cache().get("Host: localhost").expect("cached host");
    assert!(cached.host_port().is_some());
    assert!(p.field_cache().get("host: LOCALHOST").is_some());
    assert!(p.field_cache().get("X-Trace: 1").is_none());

    let r = p.into_handler();
    assert_eq!(r.fields.len(), 6);

    // dynamic entry, shared across messages
    assert!(Arc::ptr_eq(&r.fields[0], &r.fields[3]));
    assert!(Arc::ptr_eq(&r.fields[0], &cached));
    assert!(r.fields[3].is(&HOST));
    // baseline entry
    assert!(Arc::ptr_eq(&r.fields[1], &r.fields[4]));
    assert!(r.fields[1].is(&CONNECTION));
    // not cacheable
    assert!(!Arc::ptr_eq(&r.fields[2], &r.fields[5]));
    assert_eq!(r.fields[2], r.fields[5]);

    Ok(())
}

#[test]
fn zero_capacity_keeps_baseline() -> io::Result<()> {
    init_logger();
    let mut p = HttpParser::request(Recorder::with_cache_size(0));
    parse_all(&mut p, TWO_REQUESTS);

    assert_eq!(p.field_cache().capacity(), 0);
    assert!(p.field_cache().is_empty());
    assert!(p.field_cache().get("Host: localhost").is_none());

    let r = p.into_handler();
    assert!(r.failure.is_none());
    assert!(!Arc::ptr_eq(&r.fields[0], &r.fields[3]));
    assert!(Arc::ptr_eq(&r.fields[1], &r.fields[4]));

    Ok(())
}

#[test]
fn capacity_bounds_dynamic_entries() -> io::Result<()> {
    let mut p = HttpParser::request(Recorder::with_cache_size(1));
    parse_all(
        &mut p,
        b"GET / HTTP/1.1\r\nHost: one\r\nUser-Agent: agent\r\n\r\n\
        GET / HTTP/1.1\r\nHost: one\r\nUser-Agent: agent\r\n\r\n",
    );

    assert_eq!(p.field_cache().len(), 1);
    assert!(p.field_cache().is_full());
    assert!(p.field_cache().get("Host: one").is_some());
    assert!(p.field_cache().get("User-Agent: agent").is_none());

    let r = p.into_handler();
    assert!(Arc::ptr_eq(&r.fields[0], &r.fields[2]));
    assert!(!Arc::ptr_eq(&r.fields[1], &r.fields[3]));

    Ok(())
}

#[test]
fn literal_case_is_not_cached() -> io::Result<()> {
    let mut p = request_parser(HttpCompliance::LEGACY);
    parse_all(
        &mut p,
        b"GET / HTTP/1.0\r\nhost: Example\r\nHost: example\r\nCONNECTION: Close\r\n\r\n",
    );

    assert_eq!(p.field_cache().len(), 1);
    let cached = p.field_cache().get("Host: example").expect("cached host");

    let r = p.into_handler();
    assert!(!Arc::ptr_eq(&r.fields[0], &cached));
    assert!(Arc::ptr_eq(&r.fields[1], &cached));
    assert_eq!(r.fields[0].name(), "host");
    assert_eq!(r.fields[1].name(), "Host");
    assert_eq!(r.fields[1].value(), "example");
    assert_eq!(r.fields[2].name(), "CONNECTION");
    assert_eq!(r.fields[2].value(), "Close");
    assert!(r.fields[2].is(&CONNECTION));

    Ok(())
}
