//! Upgrading ID3v2.2 frame IDs

/// Upgrade a 3 character ID3v2.2 frame ID to its ID3v2.4 counterpart
///
/// IDs without a counterpart return `None`, and their frames are skipped.
///
/// # Examples
///
/// ```rust
/// use tagscan::id3::v2::upgrade_v2;
///
/// assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
/// assert_eq!(upgrade_v2("PIC"), Some("APIC"));
/// assert_eq!(upgrade_v2("XYZ"), None);
/// ```
pub fn upgrade_v2(id: &str) -> Option<&'static str> {
	let upgraded = match id {
		// Text
		"TT1" => "TIT1",
		"TT2" => "TIT2",
		"TT3" => "TIT3",
		"TP1" => "TPE1",
		"TP2" => "TPE2",
		"TP3" => "TPE3",
		"TP4" => "TPE4",
		"TAL" => "TALB",
		"TYE" => "TYER",
		"TOR" => "TORY",
		"TRK" => "TRCK",
		"TPA" => "TPOS",
		"TCO" => "TCON",
		"TCM" => "TCOM",
		"TCR" => "TCOP",
		"TPB" => "TPUB",
		"TEN" => "TENC",
		"TSS" => "TSSE",
		"TLA" => "TLAN",
		"TBP" => "TBPM",
		"TCP" => "TCMP",
		"TXX" => "TXXX",
		// Other
		"COM" => "COMM",
		"ULT" => "USLT",
		"PIC" => "APIC",
		_ => return None,
	};

	Some(upgraded)
}
