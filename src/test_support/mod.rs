//! Model fixtures shared by unit tests.
//!
//! The sample build lives under `/home/u/proj` with home `/home/u`, so that
//! base-relative, home-relative and absolute paths all occur.

use std::path::PathBuf;

use crate::core::{
    BuildInfo, ConfigurationNode, DependencySet, DirectoryEntry, JarDependency, JavaInfo,
    ModuleDependency, ModuleIdentifier, PlatformInfo, ProjectDependency, ProjectNode,
    RepositorySummary, ResolvedModule, ResolverInfo, ScalaInfo, StructureDocument,
};

/// A project with identity and directories only.
pub fn sample_project(id: &str, base: &str) -> ProjectNode {
    let mut project = ProjectNode::new(id, base, format!("{}/target", base));
    project.organization = "org.example".to_string();
    project.version = "0.1.0".to_string();
    project
}

fn scala(home: &str) -> ScalaInfo {
    ScalaInfo {
        version: "2.13.12".to_string(),
        library_jars: vec![PathBuf::from(format!("{}/.sbt/boot/scala-library.jar", home))],
        compiler_jars: vec![
            PathBuf::from(format!("{}/.sbt/boot/scala-compiler.jar", home)),
            PathBuf::from(format!("{}/.sbt/boot/scala-reflect.jar", home)),
        ],
        extra_jars: Vec::new(),
        options: vec!["-deprecation".to_string()],
    }
}

/// The root project: every optional block present.
fn root_project() -> ProjectNode {
    let mut project = sample_project("root", "/home/u/proj");
    project.name = "Root".to_string();

    project.build = BuildInfo {
        imports: vec!["sbt._".to_string(), "Keys._".to_string()],
        classpath: vec![
            PathBuf::from("/home/u/.sbt/boot/b.jar"),
            PathBuf::from("/home/u/proj/project/target/classes"),
            PathBuf::from("/opt/sbt/launcher.jar"),
            PathBuf::from("/home/u/.sbt/boot/a.jar"),
        ],
        docs: Vec::new(),
        sources: vec![
            PathBuf::from("/home/u/.sbt/src.jar"),
            PathBuf::from("/home/u/proj/project"),
        ],
    };

    project.java = Some(JavaInfo {
        home: Some(PathBuf::from("/opt/jdk")),
        options: vec!["-source".to_string(), "1.8".to_string()],
    });
    project.scala = Some(scala("/home/u"));
    project.platform = Some(PlatformInfo {
        target_version: "android-21".to_string(),
        manifest: PathBuf::from("/home/u/proj/src/main/AndroidManifest.xml"),
        apk: PathBuf::from("/home/u/proj/target/root.apk"),
        resources: PathBuf::from("/home/u/proj/src/main/res"),
        assets: PathBuf::from("/home/u/proj/src/main/assets"),
        generated_files: PathBuf::from("/home/u/proj/target/android-gen"),
        native_libs: PathBuf::from("/home/u/proj/src/main/libs"),
        is_library: false,
        proguard_config: vec!["-dontwarn scala.**".to_string()],
    });

    let mut compile = ConfigurationNode::new("compile", "/home/u/proj/target/classes");
    compile.sources = vec![
        DirectoryEntry::unmanaged("/home/u/proj/src/main/scala"),
        DirectoryEntry::managed("/home/u/proj/target/src_managed/main"),
        DirectoryEntry::unmanaged("/home/u/proj/src/main/java"),
    ];
    compile.resources = vec![DirectoryEntry::unmanaged("/home/u/proj/src/main/resources")];
    compile.excludes = vec![PathBuf::from("/home/u/proj/src/main/ignored")];

    let mut test = ConfigurationNode::new("test", "/home/u/proj/target/test-classes");
    test.sources = vec![DirectoryEntry::unmanaged("/home/u/proj/src/test/scala")];

    project.configurations = vec![test, compile];

    project.dependencies = DependencySet {
        projects: Vec::new(),
        modules: vec![ModuleDependency::new(
            ModuleIdentifier::new("org.example", "beta", "1.0"),
            &["compile"],
        )],
        jars: vec![JarDependency::new("/home/u/proj/lib/alpha.jar", &["compile", "test"])],
    };

    project.resolvers = vec![
        ResolverInfo::new("local", "/home/u/.ivy2/local"),
        ResolverInfo::new("central", "https://repo1.maven.org/maven2/"),
    ];

    project
}

fn util_project() -> ProjectNode {
    let mut project = sample_project("util", "/home/u/proj/util");

    let mut compile = ConfigurationNode::new("compile", "/home/u/proj/util/target/classes");
    compile.sources = vec![DirectoryEntry::unmanaged("/home/u/proj/util/src/main/scala")];
    project.configurations = vec![compile];

    project.dependencies.projects = vec![ProjectDependency::new("root")];

    project
}

/// A two-project build with a repository summary.
pub fn sample_document() -> StructureDocument {
    let mut beta = ResolvedModule::new(ModuleIdentifier::new("org.example", "beta", "1.0"));
    beta.binaries = vec![PathBuf::from("/home/u/.ivy2/cache/beta.jar")];
    beta.docs = vec![PathBuf::from("/opt/docs/beta-javadoc.jar")];
    beta.sources = vec![PathBuf::from("/home/u/.ivy2/cache/beta-sources.jar")];

    let mut alpha = ResolvedModule::new(ModuleIdentifier::new("org.example", "alpha", "0.3"));
    alpha.binaries = vec![PathBuf::from("/home/u/proj/lib/alpha.jar")];

    StructureDocument {
        sbt_version: "1.9.7".to_string(),
        scala: Some(scala("/home/u")),
        projects: vec![root_project(), util_project()],
        repository: Some(RepositorySummary {
            modules: vec![beta, alpha],
            local_cache: None,
        }),
        local_cache_path: Some("/home/u/.cache/coursier".to_string()),
    }
}
