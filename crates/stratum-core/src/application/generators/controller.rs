//! HTTP controller forwarding to the application handlers.

use std::path::PathBuf;

use super::{ArtifactGenerator, GenerationError, SetBuilder, code::CodeBuilder, cs};
use crate::domain::{ArtifactSet, Layer, Placement, PlacementConfig, StructuralModel};

pub struct ControllerGenerator;

impl ArtifactGenerator for ControllerGenerator {
    fn layer(&self) -> Layer {
        Layer::Controller
    }

    /// `Controllers/Common/<Plural>` for shared placement, otherwise
    /// `Controllers/Modules/<Module>`.
    fn output_root(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        let controllers = config
            .layout
            .project_dir("Http")
            .map_err(|e| GenerationError::path_resolution(Layer::Controller, config, e))?
            .join("Controllers");
        Ok(match &config.placement {
            Placement::Shared => controllers.join("Common").join(model.plural()),
            Placement::Module(module) => controllers.join("Modules").join(module.as_str()),
        })
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        let root_ns = config
            .layout
            .root_namespace()
            .map_err(|e| GenerationError::path_resolution(Layer::Controller, config, e))?;

        let mut set = SetBuilder::new(Layer::Controller, self.output_root(model, config)?);
        set.file(
            &[&cs(&format!("{}Controller", model.name()))],
            render_controller(&root_ns, &config.placement, model),
        )?;
        set.finish()
    }
}

pub fn render_controller(root_ns: &str, placement: &Placement, model: &StructuralModel) -> String {
    let m = model.name();
    let id = model.id_type();
    let area = placement.application_namespace();
    let feature = format!("{root_ns}.Application.Internal.{area}.{}", model.plural());

    let mut code = CodeBuilder::new();
    code.usings([
        "Abis.Core".to_string(),
        format!("{feature}.Commands.Handlers.Create"),
        format!("{feature}.Commands.Handlers.Delete"),
        format!("{feature}.Commands.Handlers.Edit"),
        format!("{feature}.Queries.Handlers"),
        "Microsoft.AspNetCore.Mvc".to_string(),
    ]);
    code.namespace(format!("{root_ns}.Http.Controllers.{area}"));
    code.open(format!(
        "public class {m}Controller : {}",
        placement.base_controller()
    ));

    code.region("queries", |c| {
        c.line("[HttpGet(\"{id}\")]");
        c.open(format!(
            "public async Task<IActionResult> GetById([FromRoute] {id} id)"
        ));
        c.line(format!("var request = new {m}ByIdQuery {{ Id = id }};"));
        send_and_reply(c, "NotFound");
        c.close();
    });
    code.blank();

    code.region("commands", |c| {
        c.line("[HttpPost]");
        c.open(format!(
            "public async Task<IActionResult> Create([FromBody] {m}CreateCommand request)"
        ));
        send_and_reply(c, "BadRequest");
        c.close();
        c.blank();

        c.line("[HttpPut(\"{id}\")]");
        c.open(format!(
            "public async Task<IActionResult> Edit([FromRoute] {id} id, [FromBody] {m}EditCommand request)"
        ));
        c.line("request.Id = id;");
        send_and_reply(c, "BadRequest");
        c.close();
        c.blank();

        c.line("[HttpDelete(\"{id}\")]");
        c.open(format!(
            "public async Task<IActionResult> Delete([FromRoute] {id} id)"
        ));
        c.line(format!("var request = new {m}DeleteCommand {{ Id = id }};"));
        send_and_reply(c, "BadRequest");
        c.close();
    });

    code.close();
    code.finish()
}

fn send_and_reply(code: &mut CodeBuilder, on_null: &str) {
    code.line("var response = await Mediator.Send(request);");
    code.blank();
    code.line(format!("return response == null ? {on_null}() : Ok(response);"));
}
