use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_local_pref(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    Ok(AttributeValue::LocalPreference(input.read_u32()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_pref() {
        assert_eq!(
            parse_local_pref(Bytes::from_static(&[0, 0, 0, 200])).unwrap(),
            AttributeValue::LocalPreference(200)
        );
        assert!(parse_local_pref(Bytes::new()).is_err());
    }
}
