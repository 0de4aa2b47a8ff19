use std::str::FromStr;

/// Case conversion applied to field names by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Camel,
    Snake,
    Kebab,
    Pascal,
    ScreamingSnake,
}

impl RenameRule {
    pub fn parse(lit: &syn::LitStr) -> syn::Result<Self> {
        lit.value()
            .parse()
            .map_err(|err: ParseRenameRuleError| syn::Error::new_spanned(lit, err.to_string()))
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Camel => stringcase::camel_case(name),
            Self::Snake => stringcase::snake_case(name),
            Self::Kebab => stringcase::kebab_case(name),
            Self::Pascal => stringcase::pascal_case(name),
            Self::ScreamingSnake => stringcase::macro_case(name),
        }
    }
}

impl FromStr for RenameRule {
    type Err = ParseRenameRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "kebab-case" => Ok(Self::Kebab),
            "PascalCase" => Ok(Self::Pascal),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            _ => Err(ParseRenameRuleError),
        }
    }
}

pub struct ParseRenameRuleError;

impl std::fmt::Display for ParseRenameRuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            "Unknown rename rule, expected one of: camelCase, snake_case, kebab-case, PascalCase, SCREAMING_SNAKE_CASE",
        )
    }
}
