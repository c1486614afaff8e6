use syn::{Attribute, Error, ExprPath, LitStr, Meta};

#[derive(Default)]
pub struct FieldAttributes {
    pub optional: bool,
    pub skip: bool,
    pub name: Option<LitStr>,
}

impl TryFrom<&Attribute> for FieldAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut attributes = Self::default();
        if !matches!(value.meta, Meta::List(_)) {
            return Ok(attributes);
        }

        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("optional") {
                attributes.optional = true;
            } else if meta.path.is_ident("skip") {
                attributes.skip = true;
            } else if meta.path.is_ident("name") {
                let name: LitStr = meta.value()?.parse()?;
                if name.value().is_empty() {
                    return Err(meta.error("name cannot be empty"));
                }

                attributes.name = Some(name);
            } else {
                return Err(meta.error("unrecognized inject modifier"));
            }

            Ok(())
        })?;

        Ok(attributes)
    }
}

#[derive(Default)]
pub struct ServiceAttributes {
    pub init: Option<ExprPath>,
    pub shutdown: Option<ExprPath>,
}

impl TryFrom<&Attribute> for ServiceAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut attributes = Self::default();
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("init") {
                let path: LitStr = meta.value()?.parse()?;
                attributes.init = Some(path.parse()?);
            } else if meta.path.is_ident("shutdown") {
                let path: LitStr = meta.value()?.parse()?;
                attributes.shutdown = Some(path.parse()?);
            } else {
                return Err(meta.error("unrecognized service attribute"));
            }

            Ok(())
        })?;

        Ok(attributes)
    }
}
