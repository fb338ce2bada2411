//! Database column support for [`MediaFile`].
//!
//! A media field is stored as JSON text in a TEXT column. Encoding a
//! descriptor marked for delete writes NULL; decoding absorbs the stored
//! text, so read `Option<MediaFile>` for nullable columns.

use sqlx::decode::Decode;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::{Database, Type};

use crate::media::{MediaFile, MediaInput};

impl<DB: Database> Type<DB> for MediaFile
where
    String: Type<DB>,
{
    fn type_info() -> DB::TypeInfo {
        <String as Type<DB>>::type_info()
    }

    fn compatible(ty: &DB::TypeInfo) -> bool {
        <String as Type<DB>>::compatible(ty)
    }
}

impl<'q, DB: Database> Encode<'q, DB> for MediaFile
where
    String: Encode<'q, DB>,
{
    fn encode_by_ref(
        &self,
        buf: &mut <DB as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self.value()? {
            Some(json) => <String as Encode<'q, DB>>::encode(json, buf),
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r, DB: Database> Decode<'r, DB> for MediaFile
where
    &'r str: Decode<'r, DB>,
{
    fn decode(value: <DB as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&'r str as Decode<'r, DB>>::decode(value)?;
        let mut file = MediaFile::default();
        file.scan(MediaInput::Text(text.to_string()))?;
        Ok(file)
    }
}
