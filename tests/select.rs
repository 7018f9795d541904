//! SELECT records end to end: from zonefile text to wire format and back.

use domain_select::base::iana::{Class, Rtype};
use domain_select::base::rdata::{ComposeRecordData, IsDuplicate};
use domain_select::base::scan::ScanErrorKind;
use domain_select::base::wire::Composer;
use domain_select::base::{Compressor, Name, Record, Ttl};
use domain_select::rdata::{Nsec, RtypeBitmap, Select, ZoneRecordData};
use domain_select::zonefile::Lexer;
use octseq::array::Array;
use octseq::builder::infallible;
use octseq::parse::Parser;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();
}

fn name(s: &str) -> Name {
    Name::from_str(s).unwrap()
}

fn scan_select(text: &str, origin: &Name) -> Select {
    Select::scan(&mut Lexer::new(text), origin).unwrap()
}

#[test]
fn zonefile_to_wire_and_back() {
    init_logging();

    let origin = name("example.com");
    let nsec = Record::new(
        origin.clone(),
        Class::IN,
        Ttl::HOUR,
        ZoneRecordData::from(
            Nsec::scan(&mut Lexer::new("www A SELECT"), &origin).unwrap(),
        ),
    );
    let select = Record::new(
        name("www.example.com"),
        Class::IN,
        Ttl::HOUR,
        ZoneRecordData::from(scan_select(
            "\"example\" (foo\n\t A MX TXT ) ; selected types",
            &origin,
        )),
    );
    assert_eq!(
        select.to_string(),
        "www.example.com. 3600 IN SELECT \"example\" foo.example.com. \
         A MX TXT"
    );

    let mut buf = Compressor::new(Vec::new());
    for record in [&nsec, &select] {
        let start = buf.as_slice().len();
        let len = record.compose_len(&buf);
        infallible(record.compose(&mut buf));
        assert_eq!(buf.as_slice().len() - start, len);
    }

    // The second owner is compressed, the base name is not.
    let wire = buf.as_slice();
    let second = wire.len() - (6 + 10 + 30);
    assert_eq!(&wire[second..second + 6], b"\x03www\xc0\x00");
    assert_eq!(
        &wire[second + 16..],
        b"\x07example\
          \x03foo\x07example\x03com\x00\
          \x00\x03\x40\x01\x80"
    );

    let mut parser = Parser::from_ref(wire);
    assert_eq!(Record::<ZoneRecordData>::parse(&mut parser), Ok(nsec));
    assert_eq!(Record::<ZoneRecordData>::parse(&mut parser), Ok(select));
    assert_eq!(parser.remaining(), 0);
}

#[test]
fn truncated_rdata_in_record() {
    init_logging();

    let wire = b"\x03www\x07example\x03com\x00\
        \xff\x00\x00\x01\x00\x00\x0e\x10\x00\x08\
        \x07example";
    let mut parser = Parser::from_ref(&wire[..]);
    let record = Record::<Select>::parse(&mut parser).unwrap();
    assert_eq!(record.rtype(), Rtype::SELECT);
    assert!(record.data().is_truncated());
    assert_eq!(record.data().rdlen(false), 8);
    assert_eq!(
        record.to_string(),
        "www.example.com. 3600 IN SELECT \"example\""
    );

    // The record data length stops the parser even if more data follows.
    let wire = b"\x00\xff\x00\x00\x01\x00\x00\x00\x00\x00\x09\
        \x07example\x00\
        \x03www\x00";
    let mut parser = Parser::from_ref(&wire[..]);
    let record = Record::<Select>::parse(&mut parser).unwrap();
    assert_eq!(record.data().base(), Some(&Name::root()));
    assert!(record.data().types().is_empty());
    assert_eq!(parser.remaining(), 5);
}

#[test]
fn wrong_record_type() {
    let record = Record::new(
        Name::root(),
        Class::IN,
        Ttl::ZERO,
        Nsec::new(Name::root(), RtypeBitmap::from_types([Rtype::SELECT])),
    );
    let mut buf = Vec::new();
    infallible(record.compose(&mut buf));
    let mut parser = Parser::from_ref(buf.as_slice());
    assert!(Record::<Select>::parse(&mut parser).is_err());
}

#[test]
fn short_target() {
    let record = Record::new(
        name("www.example.com"),
        Class::IN,
        Ttl::HOUR,
        scan_select("example foo.example.com. A MX TXT", &Name::root()),
    );
    let mut buf = Array::<40>::new();
    assert!(record.compose(&mut buf).is_err());

    let mut buf = Array::<64>::new();
    let len = record.compose_len(&buf);
    assert!(record.compose(&mut buf).is_ok());
    assert_eq!(buf.as_ref().len(), len);
}

#[test]
fn scan_failures_report_position() {
    init_logging();

    let err = Select::scan(
        &mut Lexer::new("\"example\" (\n  foo.example.com.\n  A BOGUS )"),
        &Name::root(),
    )
    .unwrap_err();
    assert_eq!(*err.kind(), ScanErrorKind::BadRtype("BOGUS".into()));
    assert_eq!((err.line(), err.col()), (3, 5));
    assert_eq!(
        err.to_string(),
        "unknown record type 'BOGUS' at line 3, column 5"
    );
}

#[test]
fn duplicate_records() {
    let origin = name("example.com");
    let a = scan_select("one foo A MX", &origin);
    let b = scan_select("two FOO.EXAMPLE.COM. A MX", &origin);
    let c = scan_select("one foo MX A", &origin);
    assert!(a.is_duplicate(&b) && b.is_duplicate(&a));
    assert!(!a.is_duplicate(&c) && !c.is_duplicate(&a));

    let a = ZoneRecordData::from(a);
    let nsec = ZoneRecordData::from(Nsec::new(
        name("foo.example.com"),
        RtypeBitmap::from_types([Rtype::A, Rtype::MX]),
    ));
    assert!(!a.is_duplicate(&nsec));
}

#[test]
fn rdlen_with_and_without_compression() {
    let data = scan_select("\"x y\" foo.example.com. SELECT", &Name::root());
    let mut plain = Vec::new();
    infallible(data.compose_rdata(&mut plain));
    let mut compressed = Compressor::new(Vec::new());
    infallible(compressed.append_compressed_name(&name("foo.example.com")));
    let start = compressed.as_slice().len();
    infallible(data.compose_rdata(&mut compressed));
    assert_eq!(&compressed.as_slice()[start..], plain.as_slice());
    assert_eq!(data.rdlen(true), data.rdlen(false));
    assert_eq!(usize::from(data.rdlen(false)), plain.len());
}

#[cfg(feature = "serde")]
#[test]
fn json() {
    let record = Record::new(
        name("www.example.com"),
        Class::IN,
        Ttl::HOUR,
        ZoneRecordData::from(scan_select(
            "example foo.example.com. A MX",
            &Name::root(),
        )),
    );
    let json = serde_json::to_string(&record).unwrap();
    let back: Record<ZoneRecordData> = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);

    let truncated: Select = serde_json::from_str(
        r#"{"selector":"x","base":null,"types":[]}"#,
    )
    .unwrap();
    assert!(truncated.is_truncated());
    assert!(serde_json::from_str::<Select>(
        r#"{"selector":"x","base":null,"types":["A"]}"#
    )
    .is_err());
}
