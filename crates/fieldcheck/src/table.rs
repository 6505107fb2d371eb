//! Rule tables
//!
//! A [`RuleTable`] is the parsed form of every rule annotation on one record
//! type: fields in declaration order, each with its rules in annotation
//! order. It is built once through [`RuleTableBuilder`] (directly, or by
//! `#[derive(Record)]`) and then reused for every validation call.
//!
//! # Examples
//!
//! ```
//! use fieldcheck::{FieldValue, RuleTable};
//!
//! let table = RuleTable::builder("Signup")
//!     .field::<String>("Name", "required,min=3")
//!     .field::<u32>("Age", "min=18")
//!     .build()
//!     .unwrap();
//!
//! let result = table.validate_with(|index| match index {
//!     0 => FieldValue::Str("ab"),
//!     _ => FieldValue::Int(30),
//! });
//! assert_eq!(
//!     result.unwrap_err().to_string(),
//!     "Name length (2) is lower than minimum length (3)"
//! );
//! ```

use std::any::type_name;
use std::borrow::Cow;

use crate::annotation;
use crate::config::{Mode, TableConfig};
use crate::error::{DeclarationError, ValidationError};
use crate::record::Record;
use crate::rule::Rule;
use crate::value::{AsFieldValue, FieldKind, FieldValue};

// ============================================================================
// FIELD RULES
// ============================================================================

/// One annotated field and its rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    name: Cow<'static, str>,
    kind: FieldKind,
    type_name: &'static str,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Field name used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind of the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Rust type name of the field.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs the rules left to right and returns the first failure.
    pub fn check(&self, value: FieldValue<'_>) -> Result<(), ValidationError> {
        for rule in &self.rules {
            if let Err(error) = rule.check(value) {
                return Err(if rule.prefixes_field() {
                    error.qualified_by(self.name.clone())
                } else {
                    error.with_field(self.name.clone())
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// RULE TABLE
// ============================================================================

/// Parsed rules for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    record: Cow<'static, str>,
    config: TableConfig,
    fields: Vec<FieldRules>,
}

impl RuleTable {
    /// Starts a table for the named record type.
    pub fn builder(record: impl Into<Cow<'static, str>>) -> RuleTableBuilder {
        RuleTableBuilder {
            record: record.into(),
            config: TableConfig::default(),
            fields: Vec::new(),
        }
    }

    /// Record type name.
    pub fn record(&self) -> &str {
        &self.record
    }

    /// Configuration the table was built with.
    pub fn config(&self) -> TableConfig {
        self.config
    }

    /// Annotated fields in declaration order.
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of annotated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field carries an annotation.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates a record and returns the first failure.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Result<(), ValidationError> {
        self.validate_with(|index| record.field_value(index))
    }

    /// Validates values supplied by position.
    ///
    /// `value_at(i)` must return the value of the `i`-th annotated field, in
    /// the order the fields were added to the builder.
    pub fn validate_with<'v, F>(&self, mut value_at: F) -> Result<(), ValidationError>
    where
        F: FnMut(usize) -> FieldValue<'v>,
    {
        for (index, field) in self.fields.iter().enumerate() {
            tracing::trace!(record = %self.record, field = %field.name, "checking field");

            if let Err(error) = field.check(value_at(index)) {
                tracing::debug!(
                    record = %self.record,
                    field = %field.name,
                    code = %error.code,
                    "validation failed"
                );
                return Err(error);
            }
        }
        Ok(())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

#[derive(Debug, Clone)]
struct PendingField {
    name: Cow<'static, str>,
    kind: FieldKind,
    type_name: &'static str,
    annotation: Cow<'static, str>,
}

/// Builder for [`RuleTable`].
///
/// Annotations are parsed in [`build`](Self::build), so the configuration
/// may be set at any point of the chain.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until .build() is called"]
pub struct RuleTableBuilder {
    record: Cow<'static, str>,
    config: TableConfig,
    fields: Vec<PendingField>,
}

impl RuleTableBuilder {
    /// Replaces the configuration.
    pub fn config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the declaration mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Adds an annotated field of type `T`.
    ///
    /// Fields are checked in the order they are added.
    pub fn field<T: AsFieldValue + ?Sized>(
        mut self,
        name: impl Into<Cow<'static, str>>,
        annotation: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.fields.push(PendingField {
            name: name.into(),
            kind: T::KIND,
            type_name: type_name::<T>(),
            annotation: annotation.into(),
        });
        self
    }

    /// Parses every annotation and resolves its rules.
    pub fn build(self) -> Result<RuleTable, DeclarationError> {
        let Self {
            record,
            config,
            fields,
        } = self;

        let resolved = fields
            .into_iter()
            .map(|field| resolve_field(&record, config.mode, field))
            .collect::<Result<Vec<_>, _>>();

        match resolved {
            Ok(fields) => {
                tracing::debug!(
                    record = %record,
                    fields = fields.len(),
                    mode = ?config.mode,
                    "rule table built"
                );
                Ok(RuleTable {
                    record,
                    config,
                    fields,
                })
            }
            Err(error) => {
                tracing::warn!(record = %record, %error, "invalid rule declaration");
                Err(error)
            }
        }
    }
}

fn resolve_field(
    record: &str,
    mode: Mode,
    field: PendingField,
) -> Result<FieldRules, DeclarationError> {
    let tokens = annotation::parse(&field.annotation)
        .map_err(|error| DeclarationError::from_annotation(record, &field.name, error))?;

    let mut rules = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let rule = match (Rule::from_token(token), token, mode) {
            (Some(rule), _, _) => rule,
            (None, annotation::RuleToken::Param { name, .. }, Mode::Lenient) => {
                Rule::Unknown(name.clone())
            }
            (None, _, _) => {
                return Err(DeclarationError::UnknownRule {
                    record: record.to_owned(),
                    field: field.name.clone().into_owned(),
                    name: token.name().to_owned(),
                });
            }
        };

        if mode == Mode::Strict && !rule.applies_to(field.kind) {
            return Err(DeclarationError::InapplicableRule {
                record: record.to_owned(),
                field: field.name.clone().into_owned(),
                rule: rule.name().to_owned(),
                type_name: field.type_name.to_owned(),
            });
        }

        rules.push(rule);
    }

    Ok(FieldRules {
        name: field.name,
        kind: field.kind,
        type_name: field.type_name,
        rules,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Bound;

    #[test]
    fn keeps_field_and_rule_order() {
        let table = RuleTable::builder("User")
            .field::<String>("Name", "required,min=3,max=20")
            .field::<i64>("Age", "max=150,required")
            .build()
            .unwrap();

        assert_eq!(table.record(), "User");
        assert_eq!(table.len(), 2);
        assert_eq!(table.fields()[0].name(), "Name");
        assert_eq!(
            table.field("Age").unwrap().rules(),
            &[Rule::Max(Bound::Int(150)), Rule::Required]
        );
    }

    #[test]
    fn records_kind_and_type_name() {
        let table = RuleTable::builder("T")
            .field::<&str>("A", "required")
            .field::<u8>("B", "required")
            .build()
            .unwrap();

        assert_eq!(table.fields()[0].kind(), FieldKind::Str);
        assert_eq!(table.fields()[1].kind(), FieldKind::Int);
        assert_eq!(table.fields()[1].type_name(), "u8");
    }

    #[test]
    fn first_failing_field_wins() {
        let table = RuleTable::builder("T")
            .field::<i32>("A", "required")
            .field::<String>("B", "required")
            .build()
            .unwrap();

        let error = table
            .validate_with(|index| match index {
                0 => FieldValue::Int(0),
                _ => FieldValue::Str(""),
            })
            .unwrap_err();
        assert_eq!(error.field(), Some("A"));
        assert_eq!(error.to_string(), "A is required");
    }

    #[test]
    fn first_failing_rule_wins() {
        let table = RuleTable::builder("T")
            .field::<String>("Name", "max=1,min=5")
            .build()
            .unwrap();

        let error = table.validate_with(|_| FieldValue::Str("abc")).unwrap_err();
        assert_eq!(error.code, "max");
    }

    #[test]
    fn email_message_is_not_prefixed() {
        let table = RuleTable::builder("T")
            .field::<String>("Email", "email")
            .build()
            .unwrap();

        let error = table.validate_with(|_| FieldValue::Str("nope")).unwrap_err();
        assert_eq!(error.to_string(), "e-mail is invalid");
        assert_eq!(error.field(), Some("Email"));
    }

    #[test]
    fn invalid_bound_is_a_validation_failure() {
        let table = RuleTable::builder("T")
            .field::<String>("Name", "min=abc")
            .build()
            .unwrap();

        let error = table.validate_with(|_| FieldValue::Str("x")).unwrap_err();
        assert_eq!(error.to_string(), "Name abc is not integer");
        assert_eq!(error.code, "invalid_bound");
    }

    #[test]
    fn malformed_token_is_a_declaration_error() {
        let error = RuleTable::builder("T")
            .field::<String>("Name", "min=1=2")
            .build()
            .unwrap_err();

        assert_eq!(
            error,
            DeclarationError::MalformedRule {
                record: "T".into(),
                field: "Name".into(),
                token: "min=1=2".into(),
            }
        );
    }

    #[test]
    fn unknown_flag_is_rejected_in_both_modes() {
        for mode in [Mode::Strict, Mode::Lenient] {
            let error = RuleTable::builder("T")
                .mode(mode)
                .field::<String>("Name", "requird")
                .build()
                .unwrap_err();
            assert!(matches!(error, DeclarationError::UnknownRule { ref name, .. } if name == "requird"));
        }
    }

    #[test]
    fn unknown_param_depends_on_mode() {
        let strict = RuleTable::builder("T")
            .field::<String>("Name", "len=3")
            .build();
        assert!(matches!(strict, Err(DeclarationError::UnknownRule { .. })));

        let lenient = RuleTable::builder("T")
            .config(TableConfig::lenient())
            .field::<String>("Name", "len=3")
            .build()
            .unwrap();
        let error = lenient.validate_with(|_| FieldValue::Str("abc")).unwrap_err();
        assert_eq!(error.to_string(), "len invalid key");
    }

    #[test]
    fn inapplicable_rule_depends_on_mode() {
        let strict = RuleTable::builder("T")
            .field::<bool>("Active", "required")
            .build()
            .unwrap_err();
        assert_eq!(
            strict.to_string(),
            "rule 'required' is not applicable to T.Active of type bool"
        );

        let lenient = RuleTable::builder("T")
            .mode(Mode::Lenient)
            .field::<bool>("Active", "required")
            .field::<u32>("Count", "email")
            .build()
            .unwrap();
        assert!(
            lenient
                .validate_with(|index| if index == 0 {
                    FieldValue::Other
                } else {
                    FieldValue::Int(0)
                })
                .is_ok()
        );
    }

    #[test]
    fn mode_may_be_set_after_fields() {
        let table = RuleTable::builder("T")
            .field::<String>("Name", "foo=1")
            .mode(Mode::Lenient)
            .build();
        assert!(table.is_ok());
    }

    #[test]
    fn empty_builder_validates_anything() {
        let table = RuleTable::builder("Empty").build().unwrap();
        assert!(table.is_empty());
        assert!(table.validate_with(|_| FieldValue::Other).is_ok());
    }
}
