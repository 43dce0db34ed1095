//! The request pipeline: input, template, context, render, decode.

use crate::{
    config::FunctionConfig,
    context::build_request_context,
    decoder::decode_manifests,
    error::Result,
    input::TemplateInput,
    loader::new_template_source_getter,
    protocol::{RunFunctionRequest, RunFunctionResponse},
    renderer::{compile_template, FunctionLibrary, TemplateRenderer},
};

/// Composes desired resources by rendering templates.
///
/// Holds only read-only state, so one instance can serve any number of
/// requests.
pub struct Function {
    library: FunctionLibrary,
    config: FunctionConfig,
}

impl Function {
    pub fn new(config: FunctionConfig) -> Self {
        Self { library: FunctionLibrary::new(), config }
    }

    /// Runs the function for one request.
    ///
    /// Never fails: a failing stage is reported as a fatal result on the
    /// response, next to any resources decoded before the failure.
    pub fn run_function(&self, req: &RunFunctionRequest) -> RunFunctionResponse {
        log::debug!("Running Function with tag '{}'", req.tag());

        let mut rsp = RunFunctionResponse::to(req, self.config.ttl());
        if let Err(err) = self.compose(req, &mut rsp) {
            log::error!("{err}");
            rsp.fatal(err.to_string());
        }
        rsp
    }

    fn compose(&self, req: &RunFunctionRequest, rsp: &mut RunFunctionResponse) -> Result<()> {
        let input = TemplateInput::from_request(req)?;

        let getter =
            new_template_source_getter(&input, req, self.config.template_root.as_deref())?;
        let source = getter.get_templates()?;
        log::debug!("Template source ({}):\n{source}", input.source);

        let delims = input.delimiters()?;
        let mut template = compile_template(&self.library, &source, delims.as_ref())?;

        if let Some(options) = &input.options {
            log::debug!("Setting template options {options:?}");
            template.apply_options(options)?;
        }

        let context = build_request_context(req)?;
        log::trace!("Constructed request context {context:?}");

        let rendered = template.execute(&context)?;
        log::debug!("Rendered manifests:\n{rendered}");

        let count = decode_manifests(&rendered, &mut rsp.desired, req.observed_composite())?;
        log::debug!(
            "Successfully composed desired resources from {} source, recorded {count}",
            input.source
        );
        Ok(())
    }
}

impl Default for Function {
    fn default() -> Self {
        Self::new(FunctionConfig::default())
    }
}
