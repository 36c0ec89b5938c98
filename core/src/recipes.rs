#![deny(missing_docs)]

//! # Stock Recipe Catalog
//!
//! The shipped recipes, all riding the same engine with different
//! configurations:
//!
//! - `web-client-factory`: turn a class into a WebClient factory
//!   configuration.
//! - `web-client-accessor`: wire WebClient collaborators into an accessor
//!   class.
//! - `client-config`: seed factory/configuration state plus a static
//!   initializer.
//! - `path-config`: turn a class into a path-property holder.

use crate::config::RecipeConfig;
use crate::error::{RecipeError, RecipeResult};
use crate::tree::Annotation;

/// Names and descriptions of the stock recipes, for listings.
pub fn catalog() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "web-client-factory",
            "Adds a WebClient factory bean and its configuration fields to the class",
        ),
        (
            "web-client-accessor",
            "Wires WebClient collaborators and a scaffolded accessor method into the class",
        ),
        (
            "client-config",
            "Seeds WebClient factory state and a static initializer in the class",
        ),
        (
            "path-config",
            "Adds Getter/Setter path properties to a configuration class",
        ),
    ]
}

/// Builds a stock recipe by name.
///
/// `args` carry the recipe-specific extras: a role prefix for
/// `web-client-factory`, a model type for `web-client-accessor`, the property
/// names for `path-config`.
pub fn stock(name: &str, target_fqn: &str, args: &[String]) -> RecipeResult<RecipeConfig> {
    match name {
        "web-client-factory" => {
            let role = args.first().map(String::as_str).unwrap_or("admin");
            Ok(web_client_factory(target_fqn, role))
        }
        "web-client-accessor" => {
            let model = args.first().map(String::as_str).unwrap_or("UserProfile");
            Ok(web_client_accessor(target_fqn, model))
        }
        "client-config" => Ok(client_config(target_fqn)),
        "path-config" => {
            if args.is_empty() {
                return Err(RecipeError::General(
                    "path-config needs at least one property name".into(),
                ));
            }
            Ok(path_config(target_fqn, args))
        }
        other => Err(RecipeError::General(format!("Unknown recipe: '{}'", other))),
    }
}

/// Prunes stale fields, inserts the factory and configuration fields plus a
/// `@Bean` WebClient factory method, and marks the class as a
/// `@Configuration` with a Lombok constructor.
pub fn web_client_factory(target_fqn: &str, role: &str) -> RecipeConfig {
    RecipeConfig {
        name: "web-client-factory".into(),
        description: Some("Adds a WebClient with factory configuration to the specified class".into()),
        target_fqn: target_fqn.into(),
        marker_fields: vec![
            "falconWebClientFactory".into(),
            "adminRestConfiguration".into(),
        ],
        prune_fields: true,
        template: "\
private final FalconWebClientFactory falconWebClientFactory;
private final AdminRestConfiguration adminRestConfiguration;
@Bean(name = \"#{}WebClient\")
public WebClient #{}WebClient() {
    return falconWebClientFactory
            .getWebClientBuilder(#{}RestConfiguration)
            .build();
}
"
        .into(),
        template_args: vec![role.into(), role.into(), role.into()],
        annotations: vec![
            Annotation::marker("Configuration"),
            Annotation::marker("RequiredArgsConstructor"),
        ],
        imports: vec![
            "org.springframework.context.annotation.Configuration".into(),
            "com.equinix.falcon.restful.config.rest.reactive.FalconWebClientFactory".into(),
            "org.springframework.web.reactive.function.client.WebClient".into(),
            "lombok.RequiredArgsConstructor".into(),
            "org.springframework.context.annotation.Bean".into(),
        ],
        extend_with: None,
    }
}

/// Wires `@Autowired` collaborators and a scaffolded reactive accessor
/// method into the class, marking it as a `@Repository`.
pub fn web_client_accessor(target_fqn: &str, model_type: &str) -> RecipeConfig {
    RecipeConfig {
        name: "web-client-accessor".into(),
        description: Some("Wires WebClient collaborators into the specified accessor class".into()),
        target_fqn: target_fqn.into(),
        marker_fields: vec![
            "config".into(),
            "webClient".into(),
            "falconRequestContext".into(),
        ],
        prune_fields: true,
        template: "\
@Autowired
private AdminRestConfiguration config;
@Autowired
@Qualifier(\"adminWebClient\")
private WebClient webClient;
@Autowired
private FalconRequestContext falconRequestContext;
public Mono<#{}> getUserProfile(String userName) throws FalconAppException {
    return webClient.get()
            .uri(uriBuilder -> uriBuilder.path(config.getUsersPath()).build(userName))
            .retrieve()
            .bodyToMono(#{}.class);
}
"
        .into(),
        template_args: vec![model_type.into(), model_type.into()],
        annotations: vec![Annotation::marker("Repository")],
        imports: vec![
            "com.equinix.falcon.restful.model.FalconRequestContext".into(),
            "org.springframework.web.reactive.function.client.WebClient".into(),
            "com.equinix.uecp.po.util.config.AdminRestConfiguration".into(),
            "org.springframework.stereotype.Repository".into(),
            "org.springframework.beans.factory.annotation.Autowired".into(),
            "org.springframework.beans.factory.annotation.Qualifier".into(),
            "reactor.core.publisher.Mono".into(),
            "com.equinix.falcon.exception.throwable.FalconAppException".into(),
        ],
        extend_with: None,
    }
}

/// Seeds the factory field, a `DEF_COUNT` constant and a static initializer
/// without pruning what is already there.
pub fn client_config(target_fqn: &str) -> RecipeConfig {
    RecipeConfig {
        name: "client-config".into(),
        description: Some("Seeds WebClient factory state in the specified class".into()),
        target_fqn: target_fqn.into(),
        marker_fields: vec!["falconWebClientFactory".into()],
        prune_fields: false,
        template: "\
private FalconWebClientFactory falconWebClientFactory = null;
private static final int DEF_COUNT = 20;
static {
    System.out.println(falconWebClientFactory);
}
"
        .into(),
        template_args: vec![],
        annotations: vec![Annotation::marker("Configuration")],
        imports: vec![
            "org.springframework.context.annotation.Configuration".into(),
            "com.equinix.falcon.restful.config.rest.reactive.FalconWebClientFactory".into(),
            "org.springframework.web.reactive.function.client.WebClient".into(),
        ],
        extend_with: None,
    }
}

/// Replaces the class's fields with one `@Getter`/`@Setter` String property
/// per configured name and roots the class in `ServiceConfiguration`.
pub fn path_config(target_fqn: &str, properties: &[String]) -> RecipeConfig {
    let template = properties
        .iter()
        .map(|_| "@Getter\n@Setter\nprivate String #{};\n")
        .collect::<String>();
    RecipeConfig {
        name: "path-config".into(),
        description: Some("Adds path properties to the specified configuration class".into()),
        target_fqn: target_fqn.into(),
        marker_fields: properties.to_vec(),
        prune_fields: true,
        template,
        template_args: properties.to_vec(),
        annotations: vec![Annotation::marker("Configuration")],
        imports: vec![
            "org.springframework.context.annotation.Configuration".into(),
            "lombok.Getter".into(),
            "lombok.Setter".into(),
            "com.equinix.falcon.restful.config.rest.ServiceConfiguration".into(),
        ],
        extend_with: Some("ServiceConfiguration".into()),
    }
}
