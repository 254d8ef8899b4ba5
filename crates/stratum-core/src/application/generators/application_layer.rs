//! Commands, queries, DTOs and mapper profiles of the application project.

use std::path::PathBuf;

use super::{
    ArtifactGenerator, GenerationError, SetBuilder,
    code::CodeBuilder,
    cs,
    shape::{DomainServiceShape, Parameter},
};
use crate::domain::{ArtifactSet, Layer, PlacementConfig, StructuralModel, naming};

/// The three command operations and their DTO suffixes.
const OPERATIONS: [(&str, &str); 3] = [("Create", "Created"), ("Edit", "Edited"), ("Delete", "Deleted")];

/// Namespaces shared by the application templates.
#[derive(Debug, Clone)]
pub struct ApplicationNamespaces {
    /// e.g. `Bapsis.Api.Application.Internal.Commons.Categories`
    pub feature: String,
    /// e.g. `Bapsis.Api.Domain.AggregateRoots.Categories`
    pub aggregate: String,
    /// e.g. `Bapsis.Api.Domain`
    pub domain_project: String,
    /// e.g. `Bapsis.Api`
    pub root: String,
}

impl ApplicationNamespaces {
    pub fn resolve(model: &StructuralModel, config: &PlacementConfig) -> Result<Self, GenerationError> {
        let err = |e| GenerationError::path_resolution(Layer::Application, config, e);
        let layout = &config.layout;
        let root = layout.root_namespace().map_err(err)?;
        Ok(Self {
            feature: format!(
                "{root}.Application.Internal.{}.{}",
                config.placement.application_namespace(),
                model.plural()
            ),
            aggregate: format!("{}.{}", layout.domain_namespace().map_err(err)?, model.plural()),
            domain_project: layout.domain_project_name().map_err(err)?,
            root,
        })
    }
}

/// Everything a template needs about the model.
struct Feature<'a> {
    ns: &'a ApplicationNamespaces,
    model: &'a StructuralModel,
    shape: DomainServiceShape,
    cache_key: String,
}

impl Feature<'_> {
    fn name(&self) -> &str {
        self.model.name()
    }
}

pub struct ApplicationGenerator;

impl ArtifactGenerator for ApplicationGenerator {
    fn layer(&self) -> Layer {
        Layer::Application
    }

    fn output_root(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<PathBuf, GenerationError> {
        let mut root = config
            .layout
            .project_dir("Application")
            .map_err(|e| GenerationError::path_resolution(Layer::Application, config, e))?
            .join("Internal");
        for segment in config.placement.application_segments() {
            root.push(segment);
        }
        Ok(root.join(model.plural()))
    }

    fn generate(
        &self,
        model: &StructuralModel,
        config: &PlacementConfig,
    ) -> Result<ArtifactSet, GenerationError> {
        let ns = ApplicationNamespaces::resolve(model, config)?;
        let feature = Feature {
            ns: &ns,
            model,
            shape: DomainServiceShape::from_model(model),
            cache_key: naming::screaming(model.plural()),
        };
        let m = model.name();

        let mut set = SetBuilder::new(Layer::Application, self.output_root(model, config)?);
        for (operation, suffix) in OPERATIONS {
            set.file(
                &["Commands", "Dtos", operation, &cs(&format!("{m}{suffix}Dto"))],
                render_command_dto(&feature, operation, suffix),
            )?;
        }
        set.file(
            &["Commands", "Handlers", "Create", &cs(&format!("{m}CreateCommand"))],
            render_create_command(&feature),
        )?;
        set.file(
            &["Commands", "Handlers", "Edit", &cs(&format!("{m}EditCommand"))],
            render_edit_command(&feature),
        )?;
        set.file(
            &["Commands", "Handlers", "Delete", &cs(&format!("{m}DeleteCommand"))],
            render_delete_command(&feature),
        )?;
        set.file(
            &["Queries", "Dtos", &cs(&format!("{m}ByIdQueryDto"))],
            render_query_dto(&feature),
        )?;
        set.file(
            &["Queries", "Handlers", &cs(&format!("{m}ByIdQuery"))],
            render_by_id_query(&feature),
        )?;
        set.file(&["Profiles", "MapperProfiles.cs"], render_mapper_profiles(&feature))?;
        set.finish()
    }
}

/// Request member carrying a create/edit parameter, e.g. `title` -> `Title`.
fn request_member(param: &Parameter) -> String {
    naming::upper_first(param.name.trim_start_matches('@'))
}

fn auto_property(code: &mut CodeBuilder, type_name: &str, name: &str) {
    code.line(format!("public {type_name} {name} {{ get; set; }}"));
}

fn render_command_dto(f: &Feature<'_>, operation: &str, suffix: &str) -> String {
    let mut code = CodeBuilder::new();
    code.namespace(format!("{}.Commands.Dtos.{operation}", f.ns.feature));
    code.open(format!("public class {}{suffix}Dto", f.name()));
    auto_property(&mut code, f.model.id_type().as_str(), "Id");
    if operation != "Delete" {
        for property in f.model.properties() {
            auto_property(&mut code, &property.type_name, &property.name);
        }
    }
    code.close();
    code.finish()
}

fn command_usings(f: &Feature<'_>, dtos: &str, with_models: bool) -> Vec<String> {
    let mut usings = vec![
        format!("{}.Commands.Dtos.{dtos}", f.ns.feature),
        f.ns.aggregate.clone(),
        format!("{}.Contacts", f.ns.aggregate),
        format!("{}.Constants", f.ns.domain_project),
    ];
    if with_models {
        usings.push(format!("{}.Models", f.ns.domain_project));
    }
    usings.push("MediatR".to_string());
    usings
}

fn load_from_cache(code: &mut CodeBuilder, f: &Feature<'_>) {
    code.line("var entity = await QueryService");
    code.indented(|c| {
        c.line(format!(
            ".GetFromCacheByIdAsync<{}, {}>(CacheConstants.{},",
            f.name(),
            f.model.id_type(),
            f.cache_key
        ));
        c.indented(|c| {
            c.line(format!("CacheIncludeConstants.{}, request.Id);", f.cache_key));
        });
    });
}

fn persist_and_respond(code: &mut CodeBuilder, f: &Feature<'_>, write: &str, response: &str) {
    code.line(format!("{}CommandRepository.{write}(entity);", f.name()));
    code.line("Db.Commit();");
    code.line(format!(
        "await AbisCache.RemoveAsync(CacheConstants.{}, cancellationToken);",
        f.cache_key
    ));
    code.blank();
    code.line(format!("var response = Mapper.Map<{response}>(entity);"));
    code.blank();
    code.line("return response;");
}

fn render_create_command(f: &Feature<'_>) -> String {
    let m = f.name();
    let request = format!("{m}CreateCommand");
    let response = format!("{m}CreatedDto");

    let mut code = CodeBuilder::new();
    code.usings(command_usings(f, "Create", true));
    code.namespace(format!("{}.Commands.Handlers.Create", f.ns.feature));

    code.open(format!("public class {request} : IRequest<{response}>"));
    for param in &f.shape.create_parameters {
        auto_property(&mut code, &param.type_name, &request_member(param));
    }
    code.close();
    code.blank();

    handler(&mut code, m, &request, &response, |c| {
        if f.shape.create_parameters.is_empty() {
            c.line(format!("var entity = {m}DomainService.Create();"));
        } else {
            c.line(format!("var entity = {m}DomainService.Create("));
            c.indented(|c| {
                let last = f.shape.create_parameters.len() - 1;
                for (i, param) in f.shape.create_parameters.iter().enumerate() {
                    let sep = if i == last { "" } else { "," };
                    c.line(format!("request.{}{sep}", request_member(param)));
                }
            });
            c.line(");");
        }
        c.blank();
        persist_and_respond(c, f, "Insert", &response);
    });
    code.finish()
}

fn render_edit_command(f: &Feature<'_>) -> String {
    let m = f.name();
    let request = format!("{m}EditCommand");
    let response = format!("{m}EditedDto");

    let mut code = CodeBuilder::new();
    code.usings(command_usings(f, "Edit", true));
    code.namespace(format!("{}.Commands.Handlers.Edit", f.ns.feature));

    code.open(format!("public class {request} : IRequest<{response}>"));
    auto_property(&mut code, f.model.id_type().as_str(), "Id");
    for param in &f.shape.create_parameters {
        auto_property(&mut code, &param.type_name, &request_member(param));
    }
    code.close();
    code.blank();

    handler(&mut code, m, &request, &response, |c| {
        load_from_cache(c, f);
        c.blank();
        c.line(format!("{m}DomainService.CheckNull(entity);"));
        for setter in f.shape.all_setters() {
            c.line(format!(
                "{m}DomainService.{}(entity, request.{});",
                setter.method,
                request_member(&setter.value)
            ));
        }
        c.blank();
        persist_and_respond(c, f, "Update", &response);
    });
    code.finish()
}

fn render_delete_command(f: &Feature<'_>) -> String {
    let m = f.name();
    let request = format!("{m}DeleteCommand");
    let response = format!("{m}DeletedDto");

    let mut code = CodeBuilder::new();
    code.usings(command_usings(f, "Delete", false));
    code.namespace(format!("{}.Commands.Handlers.Delete", f.ns.feature));

    code.open(format!("public class {request} : IRequest<{response}>"));
    auto_property(&mut code, f.model.id_type().as_str(), "Id");
    code.close();
    code.blank();

    handler(&mut code, m, &request, &response, |c| {
        load_from_cache(c, f);
        c.blank();
        c.line(format!("{m}DomainService.CheckNull(entity);"));
        c.line(format!("{m}DomainService.SetIsDeleted(entity, true);"));
        c.blank();
        persist_and_respond(c, f, "Update", &response);
    });
    code.finish()
}

/// Handler class whose `Handle` body is written by `body`.
fn handler(
    code: &mut CodeBuilder,
    m: &str,
    request: &str,
    response: &str,
    body: impl FnOnce(&mut CodeBuilder),
) {
    code.line(format!("public class {request}Handler : BaseInternalService,"));
    code.indented(|c| {
        c.line(format!("IRequestHandler<{request}, {response}>"));
    });
    code.open_brace();
    code.region("injections", |c| {
        c.line(format!("public I{m}CommandRepository {m}CommandRepository {{ get; set; }}"));
        c.line(format!("public I{m}DomainService {m}DomainService {{ get; set; }}"));
    });
    code.blank();
    code.open(format!(
        "public async Task<{response}> Handle({request} request, CancellationToken cancellationToken)"
    ));
    body(code);
    code.close();
    code.close();
}

fn render_query_dto(f: &Feature<'_>) -> String {
    let mut code = CodeBuilder::new();
    code.usings([format!("{}.Models", f.ns.domain_project)]);
    code.namespace(format!("{}.Queries.Dtos", f.ns.feature));
    code.open(format!("public class {}ByIdQueryDto", f.name()));
    auto_property(&mut code, f.model.id_type().as_str(), "Id");
    for property in f.model.properties() {
        auto_property(&mut code, &property.type_name, &property.name);
    }
    code.close();
    code.finish()
}

fn render_by_id_query(f: &Feature<'_>) -> String {
    let m = f.name();
    let request = format!("{m}ByIdQuery");
    let response = format!("{m}ByIdQueryDto");

    let mut code = CodeBuilder::new();
    code.usings([
        format!("{}.Queries.Dtos", f.ns.feature),
        f.ns.aggregate.clone(),
        format!("{}.Constants", f.ns.domain_project),
        "MediatR".to_string(),
    ]);
    code.namespace(format!("{}.Queries.Handlers", f.ns.feature));

    code.open(format!("public class {request} : IRequest<{response}>"));
    auto_property(&mut code, f.model.id_type().as_str(), "Id");
    code.close();
    code.blank();

    code.line(format!("public class {request}Handler : BaseInternalService,"));
    code.indented(|c| {
        c.line(format!("IRequestHandler<{request}, {response}>"));
    });
    code.open_brace();
    code.open(format!(
        "public async Task<{response}> Handle({request} request, CancellationToken cancellationToken)"
    ));
    load_from_cache(&mut code, f);
    code.blank();
    code.line(format!("var response = Mapper.Map<{response}>(entity);"));
    code.blank();
    code.line("return response;");
    code.close();
    code.close();
    code.finish()
}

fn render_mapper_profiles(f: &Feature<'_>) -> String {
    let m = f.name();
    let mut code = CodeBuilder::new();
    code.usings([
        "AutoMapper".to_string(),
        format!("{}.Commands.Dtos.Create", f.ns.feature),
        format!("{}.Commands.Dtos.Delete", f.ns.feature),
        format!("{}.Commands.Dtos.Edit", f.ns.feature),
        format!("{}.Queries.Dtos", f.ns.feature),
        format!("{}.Application.Shared.Extensions", f.ns.root),
        f.ns.aggregate.clone(),
        format!("{}.Extensions", f.ns.domain_project),
    ]);
    code.namespace(format!("{}.Profiles", f.ns.feature));
    code.open("public class MapperProfiles : Profile");
    code.open("public MapperProfiles()");
    code.region("queries", |c| {
        c.line(format!("CreateMap<{m}, {m}ByIdQueryDto>();"));
    });
    code.blank();
    code.region("commands", |c| {
        for (_, suffix) in OPERATIONS {
            c.line(format!("CreateMap<{m}, {m}{suffix}Dto>();"));
        }
    });
    code.close();
    code.close();
    code.finish()
}
