//! Style Engine - Main entry point

use fos_css::{
    AttributeDescriptor, ComputedStyle, CssError, CssParser, NodeKey, StyleResolver, StyleValue,
};
use fos_state::{Expression, ExpressionParser, FlagId, FlagLookup, FlagRegistry};

use crate::{Config, StyleError};

/// Stylesheets and state expressions for one widget tree
#[derive(Debug)]
pub struct StyleEngine {
    config: Config,
    css_parser: CssParser,
    expression_parser: ExpressionParser,
    resolver: StyleResolver,
    registry: FlagRegistry,
}

impl StyleEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        tracing::info!("fOS Style {} initialized", crate::VERSION);
        Self {
            css_parser: CssParser::new().with_diagnostics(config.record_diagnostics),
            expression_parser: ExpressionParser::new().with_max_depth(config.max_expression_depth),
            resolver: StyleResolver::new().with_index(config.index_rules),
            registry: FlagRegistry::new(),
            config,
        }
    }

    /// Parse and append a stylesheet, returning its rule count
    ///
    /// Rules of later stylesheets win ties against earlier ones.
    pub fn load_stylesheet(&mut self, css: &str) -> Result<usize, StyleError> {
        let stylesheet = self.css_parser.parse(css)?;
        let rules = stylesheet.len();
        if !stylesheet.diagnostics().is_empty() {
            tracing::debug!(
                "Stylesheet {} loaded with {} skipped declarations",
                self.resolver.stylesheets().len(),
                stylesheet.diagnostics().len()
            );
        }
        self.resolver.add_stylesheet(stylesheet);
        Ok(rules)
    }

    /// Resolve `attribute` for the leaf of `path`
    pub fn resolve<T: StyleValue>(&self, attribute: &AttributeDescriptor<T>, path: &[NodeKey]) -> T {
        self.resolver.resolve(attribute, path)
    }

    /// Resolve every attribute for the leaf of `path`
    pub fn compute(&self, path: &[NodeKey]) -> ComputedStyle {
        ComputedStyle::compute(&self.resolver, path)
    }

    /// Parse a state expression, interning its flags
    pub fn compile(&mut self, text: &str, negate_all: bool) -> Result<Expression, StyleError> {
        Ok(self.expression_parser.parse(text, negate_all, &mut self.registry)?)
    }

    /// Handle for a flag name, interning it if new
    pub fn flag(&mut self, name: &str) -> FlagId {
        self.registry.intern(name)
    }

    /// Evaluate a compiled expression against the caller's flags
    pub fn evaluate<L: FlagLookup + ?Sized>(&self, expr: &Expression, flags: &L) -> bool {
        expr.evaluate(flags)
    }

    /// Diagnostics recorded across every loaded stylesheet
    pub fn diagnostics(&self) -> impl Iterator<Item = &CssError> {
        self.resolver
            .stylesheets()
            .iter()
            .flat_map(|sheet| sheet.diagnostics().iter())
    }

    pub fn resolver(&self) -> &StyleResolver {
        &self.resolver
    }

    pub fn registry(&self) -> &FlagRegistry {
        &self.registry
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fos_css::{FontName, FONT_NAME};
    use fos_state::FlagSet;

    #[test]
    fn test_load_and_resolve() {
        let mut engine = StyleEngine::default();
        assert_eq!(engine.load_stylesheet("a { font: link } p {}").unwrap(), 2);
        assert_eq!(engine.resolve(&FONT_NAME, &[NodeKey::new("a")]), FontName::Link);
    }

    #[test]
    fn test_syntax_error_leaves_engine_unchanged() {
        let mut engine = StyleEngine::default();
        assert!(engine.load_stylesheet("a { font: link").is_err());
        assert!(engine.resolver().stylesheets().is_empty());
    }

    #[test]
    fn test_compile_shares_registry() {
        let mut engine = StyleEngine::default();
        let expr = engine.compile("hover + !disabled", false).unwrap();
        let hover = engine.flag("hover");
        assert_eq!(engine.registry().len(), 2);

        let flags: FlagSet = [hover].into_iter().collect();
        assert!(engine.evaluate(&expr, &flags));
    }

    #[test]
    fn test_config_depth_applies() {
        let config = Config { max_expression_depth: 1, ..Config::default() };
        let mut engine = StyleEngine::new(config);
        assert!(engine.compile("(a)", false).is_ok());
        assert!(matches!(engine.compile("((a))", false), Err(StyleError::State(_))));
    }

    #[test]
    fn test_diagnostics_disabled() {
        let config = Config { record_diagnostics: false, ..Config::default() };
        let mut engine = StyleEngine::new(config);
        engine.load_stylesheet("a { color: red }").unwrap();
        assert_eq!(engine.diagnostics().count(), 0);
    }
}
