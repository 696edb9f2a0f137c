//! TXT record values as returned by resolvers.

// self
use crate::_prelude::*;

/// A single TXT record: one or more character-strings that form one logical value.
///
/// Long values are split by publishers (and some DNS consoles) into 255-byte segments, so
/// comparisons always run against the concatenation of the segments.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TxtRecord {
	segments: Vec<Vec<u8>>,
}
impl TxtRecord {
	/// Builds a record from its character-string segments, in wire order.
	pub fn from_segments<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Vec<u8>>,
	{
		Self { segments: segments.into_iter().map(Into::into).collect() }
	}

	/// Builds a record holding a single character-string.
	pub fn single(value: impl Into<Vec<u8>>) -> Self {
		Self { segments: vec![value.into()] }
	}

	/// Raw segments in wire order.
	pub fn segments(&self) -> &[Vec<u8>] {
		&self.segments
	}

	/// Concatenation of all segments.
	pub fn joined(&self) -> Vec<u8> {
		self.segments.concat()
	}

	/// Returns true when the concatenated value equals `expected` byte-for-byte.
	pub fn matches(&self, expected: &str) -> bool {
		self.segments.iter().flatten().copied().eq(expected.bytes())
	}
}
impl Debug for TxtRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TxtRecord").field(&self.to_string()).finish()
	}
}
impl Display for TxtRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&String::from_utf8_lossy(&self.joined()))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn split_segments_match_like_a_single_segment() {
		let split = TxtRecord::from_segments(["ident", "ifier=tok", "en123"]);
		let single = TxtRecord::single("identifier=token123");

		assert_eq!(split.joined(), single.joined());
		assert!(split.matches("identifier=token123"));
		assert!(single.matches("identifier=token123"));
		assert!(!split.matches("identifier=token12"));
		assert!(!split.matches("identifier=token1234"));
	}

	#[test]
	fn matching_is_case_sensitive() {
		let record = TxtRecord::single("domain-verification=abcdef");

		assert!(!record.matches("domain-verification=ABCDEF"));
		assert!(!record.matches("Domain-Verification=abcdef"));
	}

	#[test]
	fn display_is_lossy_utf8() {
		let record = TxtRecord::from_segments([b"v=spf1 ".to_vec(), vec![0xff], b" -all".to_vec()]);

		assert_eq!(record.to_string(), "v=spf1 \u{fffd} -all");
	}
}
