// Shorthand for return Err(TagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(TagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(TagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FileDecodingError::new(FileType::Foo, "Message")
//
// Usage:
//
// - decode_err!(Variant, Message)
// - decode_err!(Message)
//
// or bail:
//
// - decode_err!(@BAIL Variant, Message)
// - decode_err!(@BAIL Message)
macro_rules! decode_err {
	($file_ty:ident, $reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::FileDecodingError::new(
			crate::file::FileType::$file_ty,
			$reason,
		))
	};
	($reason:literal) => {
		Into::<crate::error::TagError>::into(crate::error::FileDecodingError::from_description(
			$reason,
		))
	};
	(@BAIL $($file_ty:ident,)? $reason:literal) => {
		return Err(decode_err!($($file_ty,)? $reason))
	};
}

// Generates a case-insensitive lookup from format-specific keys to `MetaTagIdentifier`s
//
// Usage:
//
// - gen_map!(
// 		NAME;
//
// 		"KEY" | "ALIAS" => Variant,
// 	 )
//
// The map is created on first use, and `NAME.get_identifier(key)` performs the lookup.
macro_rules! gen_map {
	(
		$(#[$meta:meta])?
		$NAME:ident;

		$(
			$($key:literal)|+ => $variant:ident
		),+ $(,)?
	) => {
		paste::paste! {
			$(#[$meta])?
			#[allow(non_camel_case_types)]
			pub(crate) struct $NAME;

			static [<$NAME _INSTANCE>]: std::sync::OnceLock<
				std::collections::HashMap<String, crate::tag::MetaTagIdentifier>,
			> = std::sync::OnceLock::new();

			$(#[$meta])?
			impl $NAME {
				pub(crate) fn get_identifier(&self, key: &str) -> Option<crate::tag::MetaTagIdentifier> {
					[<$NAME _INSTANCE>].get_or_init(|| {
						let mut map = std::collections::HashMap::new();
						$(
							$(
								map.insert(
									$key.to_ascii_uppercase(),
									crate::tag::MetaTagIdentifier::$variant,
								);
							)+
						)+
						map
					}).get(&key.to_ascii_uppercase()).copied()
				}
			}
		}
	};
}

pub(crate) use {decode_err, err, gen_map};
