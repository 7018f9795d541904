//! Resource Record (RR) TYPEs

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Resource Record Types.
    ///
    /// Each resource record has a 16 bit type value indicating what kind of
    /// information is represented by the record. This type wraps that value
    /// and knows the mnemonics of the commonly used types. Any other value
    /// is presented in the generic `TYPE<n>` form of [RFC 3597].
    ///
    /// The list of assigned values is maintained in an [IANA registry].
    ///
    /// [RFC 3597]: https://tools.ietf.org/html/rfc3597
    /// [IANA registry]: http://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
    =>
    Rtype, u16;

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// Marks the start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// Responsible person.
    (RP => 17, "RP")

    /// AFS data base location.
    (AFSDB => 18, "AFSDB")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Location information.
    (LOC => 29, "LOC")

    /// Server selection.
    (SRV => 33, "SRV")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    /// Certificate.
    (CERT => 37, "CERT")

    /// Delegation name.
    (DNAME => 39, "DNAME")

    /// The pseudo record type for EDNS.
    (OPT => 41, "OPT")

    /// Delegation signer.
    (DS => 43, "DS")

    /// SSH key fingerprint.
    (SSHFP => 44, "SSHFP")

    /// IPsec keying material.
    (IPSECKEY => 45, "IPSECKEY")

    /// A DNSSEC signature.
    (RRSIG => 46, "RRSIG")

    /// Next secure, the authenticated denial of existence.
    ///
    /// See RFC 4034.
    (NSEC => 47, "NSEC")

    /// A DNS public key.
    (DNSKEY => 48, "DNSKEY")

    /// DHCP identifier.
    (DHCID => 49, "DHCID")

    /// Hashed next secure.
    (NSEC3 => 50, "NSEC3")

    /// Parameters for hashed next secure.
    (NSEC3PARAM => 51, "NSEC3PARAM")

    /// TLS certificate association.
    (TLSA => 52, "TLSA")

    /// S/MIME certificate association.
    (SMIMEA => 53, "SMIMEA")

    /// Child DS.
    (CDS => 59, "CDS")

    /// Child DNSKEY.
    (CDNSKEY => 60, "CDNSKEY")

    /// OpenPGP key.
    (OPENPGPKEY => 61, "OPENPGPKEY")

    /// Child-to-parent synchronization.
    (CSYNC => 62, "CSYNC")

    /// Message digest for DNS zones.
    (ZONEMD => 63, "ZONEMD")

    /// General purpose service binding.
    (SVCB => 64, "SVCB")

    /// Service binding for HTTPS.
    (HTTPS => 65, "HTTPS")

    /// Transaction signature.
    (TSIG => 250, "TSIG")

    /// Incremental transfer.
    (IXFR => 251, "IXFR")

    /// Transfer of an entire zone.
    (AXFR => 252, "AXFR")

    /// A request for all records.
    (ANY => 255, "ANY")

    /// Uniform resource identifier.
    (URI => 256, "URI")

    /// Certification authority restriction.
    (CAA => 257, "CAA")

    /// Selection of a base name and the record types found beneath it.
    ///
    /// The type has no registered code point. It uses the first value of
    /// the private use range.
    (SELECT => 65280, "SELECT")
}

int_enum_str_with_prefix!(Rtype, "TYPE", b"TYPE", u16, "unknown record type");

//============ Tests =========================================================
