use std::fmt::Debug;

use serde_json::Value;
use skiff_source::{merge_kwargs, Kwargs, SourceDescriptor, SourceKind};

use crate::artifact::ArtifactRef;
use crate::capability::Capability;
use crate::environment::Environment;
use crate::error::{ReaderError, ReaderResult};

/// Key under which a descriptor's storage options are injected into the
/// backend call for variants that declare `needs_storage_options`.
pub const STORAGE_OPTIONS_KEY: &str = "storage_options";

/// A reader bound to one source descriptor.
///
/// Readers are stateless from the caller's point of view: `load` and
/// `preview` are idempotent and repeated calls are not cached or
/// deduplicated by this layer.
pub trait Reader {
    /// Produce the data artifact, applying `overrides` on top of the
    /// descriptor's stored keyword arguments (override wins on collision).
    fn load(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef>;

    /// A cheap, bounded-size sample of the artifact. Variants that cannot
    /// preview without a full-size load leave this unimplemented.
    fn preview(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        let _ = overrides;
        Err(ReaderError::unsupported("preview for this reader"))
    }
}

/// A registered reader variant: a capability declaration plus a way to bind
/// a reader instance to a descriptor.
pub trait ReaderVariant: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn capability(&self) -> &Capability;

    /// Bind a reader to the given descriptor. The reader borrows both the
    /// environment and the descriptor and holds no other state.
    fn create_reader<'a>(
        &'a self,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> ReaderResult<Box<dyn Reader + 'a>>;

    fn supports(&self, kind: SourceKind) -> bool {
        self.capability().supports(kind)
    }

    /// Whether every required package is available. Probe failures read as
    /// unavailable; this never errors and loads no backend code.
    fn check_packages(&self, env: &Environment) -> bool {
        self.capability()
            .requires
            .iter()
            .all(|package| env.has_package(package))
    }

    /// Documentation registered for the variant's load function, if any.
    fn doc(&self, env: &Environment) -> Option<String> {
        self.capability()
            .load_func
            .name()
            .and_then(|name| env.functions().doc(name))
    }
}

/// The shared load path for declaration-driven variants: kwargs layering,
/// storage-option injection, multi-file fan-out with ordered concatenation,
/// and primary-URL injection, ending in the resolved backend call.
pub struct FuncReader<'a> {
    capability: &'a Capability,
    env: &'a Environment,
    source: &'a SourceDescriptor,
}

impl<'a> FuncReader<'a> {
    pub fn new(
        capability: &'a Capability,
        env: &'a Environment,
        source: &'a SourceDescriptor,
    ) -> Self {
        Self {
            capability,
            env,
            source,
        }
    }
}

impl Reader for FuncReader<'_> {
    fn load(&self, overrides: &Kwargs) -> ReaderResult<ArtifactRef> {
        let mut kw = merge_kwargs(vec![self.source.kwargs().clone(), overrides.clone()]);
        if self.capability.needs_storage_options {
            if let Some(options) = self.source.storage_options() {
                kw.insert(
                    STORAGE_OPTIONS_KEY.to_string(),
                    Value::Object(options.clone().into_iter().collect()),
                );
            }
        }
        if let Some(url_param) = self.capability.url_param {
            if !overrides.contains_key(url_param) {
                if let Some(concat_func) = &self.capability.concat_func {
                    let files = self.source.files();
                    if files.len() > 1 {
                        // Fan out one sub-load per file, in list order, and
                        // merge. The first failing file aborts the call.
                        let concat = concat_func.resolve(self.env.functions())?;
                        log::debug!("loading {} files for concatenation", files.len());
                        let mut parts = Vec::with_capacity(files.len());
                        for file in files {
                            let mut part = kw.clone();
                            part.insert(url_param.to_string(), Value::String(file.clone()));
                            parts.push(self.load(&part)?);
                        }
                        return Ok(concat(parts)?);
                    }
                }
            }
            // A URL supplied by the caller or by the fan-out above is
            // never overwritten with the primary URL.
            if !kw.contains_key(url_param) {
                let url = self.source.url().ok_or_else(|| {
                    ReaderError::missing(format!("source URL for argument '{url_param}'"))
                })?;
                kw.insert(url_param.to_string(), Value::String(url.to_string()));
            }
        }
        let func = self.capability.load_func.resolve(self.env.functions())?;
        Ok(func(&kw)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::any::Any;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::artifact::Artifact;
    use crate::function::{FuncRef, FunctionRegistry};

    #[derive(Debug)]
    struct Probe(Kwargs);

    impl Artifact for Probe {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn probe_capability(url_param: Option<&'static str>) -> Capability {
        let load: crate::function::LoadFn =
            Arc::new(|kw: &Kwargs| Ok(Box::new(Probe(kw.clone())) as ArtifactRef));
        Capability {
            implements: &[SourceKind::Csv],
            requires: &["no-such-package"],
            optional: &[],
            load_func: FuncRef::Bound(load),
            concat_func: None,
            url_param,
            needs_storage_options: false,
            output_instance: "test:Probe",
        }
    }

    #[derive(Debug)]
    struct ProbeVariant(Capability);

    impl ReaderVariant for ProbeVariant {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn capability(&self) -> &Capability {
            &self.0
        }

        fn create_reader<'a>(
            &'a self,
            env: &'a Environment,
            source: &'a SourceDescriptor,
        ) -> ReaderResult<Box<dyn Reader + 'a>> {
            Ok(Box::new(FuncReader::new(&self.0, env, source)))
        }
    }

    fn env() -> Environment {
        Environment::new(Arc::new(FunctionRegistry::new()))
    }

    #[test]
    fn test_missing_package_never_errors() {
        let variant = ProbeVariant(probe_capability(None));
        assert!(!variant.check_packages(&env()));
    }

    #[test]
    fn test_base_preview_unsupported() {
        let variant = ProbeVariant(probe_capability(None));
        let env = env();
        let source = SourceDescriptor::new(SourceKind::Csv, "a.csv");
        let reader = variant.create_reader(&env, &source).unwrap();
        assert!(matches!(
            reader.preview(&Kwargs::new()),
            Err(ReaderError::NotSupported(_))
        ));
    }

    #[test]
    fn test_missing_url_is_an_error() {
        let variant = ProbeVariant(probe_capability(Some("path")));
        let env = env();
        let source = SourceDescriptor::query("SELECT 1");
        let reader = variant.create_reader(&env, &source).unwrap();
        assert!(matches!(
            reader.load(&Kwargs::new()),
            Err(ReaderError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_caller_url_wins_over_primary() {
        let variant = ProbeVariant(probe_capability(Some("path")));
        let env = env();
        let source = SourceDescriptor::new(SourceKind::Csv, "a.csv");
        let reader = variant.create_reader(&env, &source).unwrap();
        let overrides = Kwargs::from([("path".to_string(), json!("other.csv"))]);
        let artifact = reader.load(&overrides).unwrap();
        let probe = artifact.as_any().downcast_ref::<Probe>().unwrap();
        assert_eq!(probe.0.get("path"), Some(&json!("other.csv")));
    }
}
