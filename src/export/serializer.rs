//! Rendering of a [`StructureDocument`] into a [`Tree`].
//!
//! Rendering is deterministic: every collection is emitted in a fixed order
//! independent of input order, optional values are omitted rather than
//! emitted empty, and every file path goes through a [`PathContext`].
//!
//! Each project is rendered with its own context whose base is the project
//! directory. The repository section is rendered against home only.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use url::Url;

use crate::core::{
    BuildInfo, ConfigurationNode, DependencySet, DirectoryEntry, JavaInfo, PlatformInfo,
    ProjectNode, RepositorySummary, ResolvedModule, ResolverInfo, ScalaInfo, StructureDocument,
};
use crate::export::errors::ExportError;
use crate::export::path_codec::{absolute_path, PathContext, HOME_TOKEN};
use crate::export::tree::Tree;

/// Render `doc`, shortening paths against `home` and each project's base.
pub fn render(doc: &StructureDocument, home: &Path) -> Result<Tree, ExportError> {
    render_with(doc, &PathContext::new(home)?)
}

/// Render `doc` with `ctx` supplying the home directory.
///
/// Any base set on `ctx` is ignored; each project sets its own.
pub fn render_with(doc: &StructureDocument, ctx: &PathContext) -> Result<Tree, ExportError> {
    StructureSerializer::new(ctx.clone()).render(doc)
}

/// Renders structure documents.
#[derive(Debug, Clone)]
pub struct StructureSerializer {
    ctx: PathContext,
    include_repository: bool,
}

impl StructureSerializer {
    pub fn new(ctx: PathContext) -> Self {
        StructureSerializer {
            ctx: ctx.without_base(),
            include_repository: true,
        }
    }

    /// Leave the `<repository>` section out of the output.
    pub fn without_repository(mut self) -> Self {
        self.include_repository = false;
        self
    }

    /// Render the whole document.
    ///
    /// Fails on the first invalid path; no partial tree is returned.
    pub fn render(&self, doc: &StructureDocument) -> Result<Tree, ExportError> {
        doc.validate()?;

        let scala = doc
            .scala
            .as_ref()
            .map(|scala| render_scala(scala, &Paths::global(&self.ctx)))
            .transpose()
            .map_err(|e| e.in_field("scala"))?;

        let mut projects = doc
            .projects
            .iter()
            .map(|project| {
                absolute_path(&project.base)
                    .map(|base| (base, project))
                    .map_err(|e| e.in_field(format!("project[{}].base", project.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        projects.sort_by(|(a, pa), (b, pb)| a.cmp(b).then_with(|| pa.id.cmp(&pb.id)));

        let projects = projects
            .par_iter()
            .map(|(base, project)| {
                self.render_project(project, base)
                    .map_err(|e| e.in_field(format!("project[{}]", project.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let repository = match &doc.repository {
            Some(repository) if self.include_repository => Some(
                self.render_repository(repository)
                    .map_err(|e| e.in_field("repository"))?,
            ),
            _ => None,
        };

        let local_cache_path = match (&doc.local_cache_path, &doc.repository) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(RepositorySummary {
                local_cache: Some(cache),
                ..
            })) => Some(
                self.ctx
                    .canonicalize(cache)
                    .map_err(|e| e.in_field("repository.local_cache"))?,
            ),
            _ => None,
        };

        Ok(Tree::new("structure")
            .attr("sbt", doc.sbt_version.as_str())
            .child_opt(scala)
            .children(projects)
            .child_opt(repository)
            .child_opt(local_cache_path.map(|path| Tree::leaf("localCachePath", path))))
    }

    fn render_project(&self, project: &ProjectNode, base: &str) -> Result<Tree, ExportError> {
        tracing::debug!(project = %project.id, base, "rendering project");

        let ctx = self.ctx.with_base(&project.base)?;
        let paths = Paths::project(&ctx);

        let java = project.java.as_ref().map(|java| render_java(java, &paths)).transpose()?;
        let scala = project
            .scala
            .as_ref()
            .map(|scala| render_scala(scala, &paths))
            .transpose()
            .map_err(|e| e.in_field("scala"))?;
        let platform = project
            .platform
            .as_ref()
            .map(|platform| render_platform(platform, &paths))
            .transpose()
            .map_err(|e| e.in_field("android"))?;

        let mut configurations: Vec<&ConfigurationNode> = project.configurations.iter().collect();
        configurations.sort_by(|a, b| a.id.cmp(&b.id));
        let configurations = configurations
            .into_iter()
            .map(|configuration| {
                render_configuration(configuration, &paths)
                    .map_err(|e| e.in_field(format!("configuration[{}]", configuration.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut resolvers: Vec<&ResolverInfo> = project.resolvers.iter().collect();
        resolvers.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.root.cmp(&b.root)));
        let resolvers = resolvers
            .into_iter()
            .map(|resolver| render_resolver(resolver, &paths))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Tree::new("project")
            .child(Tree::leaf("id", project.id.as_str()))
            .child(Tree::leaf("name", project.name.as_str()))
            .child(Tree::leaf("organization", project.organization.as_str()))
            .child(Tree::leaf("version", project.version.as_str()))
            .child(Tree::leaf("base", base))
            .child(Tree::leaf("target", paths.render(&project.target, "target")?))
            .child(render_build(&project.build, &paths)?)
            .child_opt(java)
            .child_opt(scala)
            .child_opt(platform)
            .children(configurations)
            .child(render_dependencies(&project.dependencies, &paths)?)
            .children(resolvers))
    }

    fn render_repository(&self, repository: &RepositorySummary) -> Result<Tree, ExportError> {
        let paths = Paths::global(&self.ctx);

        let mut modules: Vec<&ResolvedModule> = repository.modules.iter().collect();
        modules.sort_by(|a, b| a.id.cmp(&b.id));

        let modules = modules
            .into_iter()
            .map(|module| {
                render_resolved_module(module, &paths)
                    .map_err(|e| e.in_field(format!("module[{}]", module.id)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Tree::new("repository").children(modules))
    }
}

/// Path rendering for one section of the document.
struct Paths<'a> {
    ctx: &'a PathContext,
    project_scoped: bool,
}

impl<'a> Paths<'a> {
    /// Paths inside a project subtree; the context must carry a base.
    fn project(ctx: &'a PathContext) -> Self {
        Paths {
            ctx,
            project_scoped: true,
        }
    }

    /// Paths outside any project.
    fn global(ctx: &'a PathContext) -> Self {
        Paths {
            ctx,
            project_scoped: false,
        }
    }

    fn render(&self, path: &Path, field: &str) -> Result<String, ExportError> {
        let result = if self.project_scoped {
            self.ctx.canonicalize_in_project(path)
        } else {
            self.ctx.canonicalize(path)
        };
        result.map_err(|e| e.in_field(field))
    }

    /// Render each path as a `<name>` leaf, keeping the given order.
    fn leaves(&self, name: &str, paths: &[PathBuf]) -> Result<Vec<Tree>, ExportError> {
        paths
            .iter()
            .map(|path| Ok(Tree::leaf(name, self.render(path, name)?)))
            .collect()
    }

    /// Render each path as a `<name>` leaf, sorted by rendered form.
    fn sorted_leaves(&self, name: &str, paths: &[PathBuf]) -> Result<Vec<Tree>, ExportError> {
        let mut rendered = paths
            .iter()
            .map(|path| self.render(path, name))
            .collect::<Result<Vec<_>, _>>()?;
        rendered.sort();
        Ok(rendered
            .into_iter()
            .map(|path| Tree::leaf(name, path))
            .collect())
    }
}

fn render_build(build: &BuildInfo, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    let mut classes = build
        .classpath
        .iter()
        .map(|path| paths.render(path, "build.classes"))
        .collect::<Result<Vec<_>, _>>()?;
    classes.retain(|path| path.starts_with(HOME_TOKEN));
    classes.sort();

    Ok(Tree::new("build")
        .children(build.imports.iter().map(|import| Tree::leaf("import", import.as_str())))
        .children(classes.into_iter().map(|path| Tree::leaf("classes", path)))
        .children(paths.sorted_leaves("docs", &build.docs)?)
        .children(paths.sorted_leaves("sources", &build.sources)?))
}

fn render_java(java: &JavaInfo, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    let home = java
        .home
        .as_ref()
        .map(|home| paths.render(home, "java.home"))
        .transpose()?;

    Ok(Tree::new("java")
        .child_opt(home.map(|home| Tree::leaf("home", home)))
        .children(options(&java.options)))
}

fn render_scala(scala: &ScalaInfo, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    Ok(Tree::new("scala")
        .child(Tree::leaf("version", scala.version.as_str()))
        .children(paths.leaves("library", &scala.library_jars)?)
        .children(paths.leaves("compiler", &scala.compiler_jars)?)
        .children(paths.leaves("extra", &scala.extra_jars)?)
        .children(options(&scala.options)))
}

fn render_platform(platform: &PlatformInfo, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    Ok(Tree::new("android")
        .attr("version", platform.target_version.as_str())
        .flag("isLibrary", platform.is_library)
        .child(Tree::leaf("manifest", paths.render(&platform.manifest, "manifest")?))
        .child(Tree::leaf("apk", paths.render(&platform.apk, "apk")?))
        .child(Tree::leaf("resources", paths.render(&platform.resources, "resources")?))
        .child(Tree::leaf("assets", paths.render(&platform.assets, "assets")?))
        .child(Tree::leaf(
            "generatedFiles",
            paths.render(&platform.generated_files, "generatedFiles")?,
        ))
        .child(Tree::leaf(
            "nativeLibs",
            paths.render(&platform.native_libs, "nativeLibs")?,
        ))
        .children(
            platform
                .proguard_config
                .iter()
                .map(|line| Tree::leaf("proguard", line.as_str())),
        ))
}

fn render_configuration(
    configuration: &ConfigurationNode,
    paths: &Paths<'_>,
) -> Result<Tree, ExportError> {
    let mut excludes = configuration
        .excludes
        .iter()
        .map(|path| Ok::<_, ExportError>((absolute_path(path)?, path)))
        .collect::<Result<Vec<_>, ExportError>>()
        .map_err(|e| e.in_field("exclude"))?;
    excludes.sort_by(|a, b| a.0.cmp(&b.0));
    let excludes = excludes
        .into_iter()
        .map(|(_, path)| paths.render(path, "exclude").map(|path| Tree::leaf("exclude", path)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Tree::new("configuration")
        .attr("id", configuration.id.as_str())
        .children(render_directories("sources", &configuration.sources, paths)?)
        .children(render_directories("resources", &configuration.resources, paths)?)
        .children(excludes)
        .child(Tree::leaf(
            "classes",
            paths.render(&configuration.classes, "classes")?,
        )))
}

/// Unmanaged entries first, then by path.
fn render_directories(
    name: &str,
    entries: &[DirectoryEntry],
    paths: &Paths<'_>,
) -> Result<Vec<Tree>, ExportError> {
    let mut keyed = entries
        .iter()
        .map(|entry| Ok::<_, ExportError>(((entry.managed, absolute_path(&entry.file)?), entry)))
        .collect::<Result<Vec<_>, ExportError>>()
        .map_err(|e| e.in_field(name))?;
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    keyed
        .into_iter()
        .map(|(_, entry)| {
            Ok(Tree::new(name)
                .flag("managed", entry.managed)
                .text(paths.render(&entry.file, name)?))
        })
        .collect()
}

fn render_dependencies(
    dependencies: &DependencySet,
    paths: &Paths<'_>,
) -> Result<Tree, ExportError> {
    let mut projects: Vec<_> = dependencies.projects.iter().collect();
    projects.sort_by(|a, b| a.project.cmp(&b.project));

    let mut modules: Vec<_> = dependencies.modules.iter().collect();
    modules.sort_by(|a, b| a.id.cmp(&b.id));

    let mut jars = dependencies
        .jars
        .iter()
        .map(|jar| Ok::<_, ExportError>((absolute_path(&jar.file)?, jar)))
        .collect::<Result<Vec<_>, ExportError>>()
        .map_err(|e| e.in_field("dependencies.jar"))?;
    jars.sort_by(|a, b| a.0.cmp(&b.0));

    let jars = jars
        .into_iter()
        .map(|(_, jar)| {
            Ok(Tree::new("jar")
                .list_attr("configurations", &jar.configurations)
                .text(paths.render(&jar.file, "dependencies.jar")?))
        })
        .collect::<Result<Vec<_>, ExportError>>()?;

    Ok(Tree::new("dependencies")
        .children(projects.into_iter().map(|dependency| {
            Tree::new("project")
                .attr_opt("configuration", dependency.configuration.clone())
                .text(dependency.project.as_str())
        }))
        .children(modules.into_iter().map(|dependency| {
            dependency
                .id
                .attributes()
                .into_iter()
                .fold(Tree::new("module"), |tree, (name, value)| tree.attr(name, value))
                .list_attr("configurations", &dependency.configurations)
        }))
        .children(jars))
}

fn render_resolver(resolver: &ResolverInfo, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    let root = match resolver_root_path(&resolver.root) {
        Some(path) => paths.render(&path, "resolver.root")?,
        None => resolver.root.clone(),
    };

    Ok(Tree::new("resolver")
        .attr("name", resolver.name.as_str())
        .attr("root", root))
}

/// The local directory a resolver root points at, if it is not remote.
fn resolver_root_path(root: &str) -> Option<PathBuf> {
    let path = Path::new(root);
    if absolute_path(path).is_ok() {
        return Some(path.to_path_buf());
    }
    match Url::parse(root) {
        Ok(url) if url.scheme() == "file" => url.to_file_path().ok(),
        _ => None,
    }
}

fn render_resolved_module(module: &ResolvedModule, paths: &Paths<'_>) -> Result<Tree, ExportError> {
    Ok(module
        .id
        .attributes()
        .into_iter()
        .fold(Tree::new("module"), |tree, (name, value)| tree.attr(name, value))
        .children(paths.sorted_leaves("jar", &module.binaries)?)
        .children(paths.sorted_leaves("doc", &module.docs)?)
        .children(paths.sorted_leaves("src", &module.sources)?))
}

fn options(options: &[String]) -> impl Iterator<Item = Tree> + '_ {
    options.iter().map(|option| Tree::leaf("option", option.as_str()))
}
