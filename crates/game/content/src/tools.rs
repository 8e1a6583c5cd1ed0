//! Named tool construction.

use std::str::FromStr;

use delve_core::{ItemState, ObjectBase, ToolKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FactoryError {
    #[error("the tool type '{0}' does not exist")]
    UnknownTool(String),
}

/// Builds specialised tools from their type names.
///
/// Only the specialised kinds have names; a generic tool is built directly
/// with [`ItemState::tool`].
pub struct ToolFactory;

impl ToolFactory {
    /// Resolves a tool type name, ignoring case. `"prybar"` and `"pry_bar"`
    /// both name the pry bar.
    pub fn kind(name: &str) -> Result<ToolKind, FactoryError> {
        let unknown = || FactoryError::UnknownTool(name.to_owned());
        if name.eq_ignore_ascii_case("prybar") {
            return Ok(ToolKind::PryBar);
        }
        match ToolKind::from_str(name) {
            Ok(ToolKind::Generic) | Err(_) => Err(unknown()),
            Ok(kind) => Ok(kind),
        }
    }

    pub fn make_tool(name: &str, base: ObjectBase) -> Result<ItemState, FactoryError> {
        let kind = Self::kind(name)?;
        Ok(ItemState::tool(base, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{EntityId, Position};

    #[test]
    fn names_are_case_insensitive() {
        for (name, kind) in [
            ("wrench", ToolKind::Wrench),
            ("WRENCH", ToolKind::Wrench),
            ("PryBar", ToolKind::PryBar),
            ("prybar", ToolKind::PryBar),
            ("pry_bar", ToolKind::PryBar),
        ] {
            assert_eq!(ToolFactory::kind(name), Ok(kind), "{name}");
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["hammer", "generic", ""] {
            assert_eq!(
                ToolFactory::kind(name),
                Err(FactoryError::UnknownTool(name.to_owned()))
            );
        }
    }

    #[test]
    fn made_tool_keeps_its_base() {
        let base = ObjectBase::new(EntityId(3), Position::new(1, 2)).with_description("a wrench");

        let tool = ToolFactory::make_tool("wrench", base.clone()).unwrap();

        assert_eq!(tool.base, base);
        assert_eq!(tool.tool_kind(), Some(ToolKind::Wrench));
    }
}
