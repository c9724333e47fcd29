// ! Resource templates: URI patterns with variables plus a callback that
// ! produces resources when matched.
// !
// ! Unlike [`crate::core::resource::Resource`], a registered template has no
// ! single fixed URI: it is resolved against an incoming URI at read time by
// ! compiling its `uriTemplate` (RFC 6570) and matching the captured variables
// ! through to the read callback.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::completion::CompletionContext;
use crate::core::error::{McpError, McpResult};
use crate::protocol::types::{Annotations, ResourceContents, ResourceTemplate as ResourceTemplateInfo};
use crate::utils::uri_template::UriTemplate;

/// Produces resource contents for a URI that matched a template.
#[async_trait]
pub trait ResourceTemplateHandler: Send + Sync {
    /// Read the resource identified by `uri`, with `variables` holding the
    /// values captured from the URI template match.
    async fn read(
        &self,
        uri: &str,
        variables: &HashMap<String, String>,
    ) -> McpResult<Vec<ResourceContents>>;
}

/// Enumerates the concrete resources a template can currently produce, used
/// to answer `resources/list` alongside exact resources. Optional: templates
/// with unbounded or infinite domains may omit it.
#[async_trait]
pub trait ResourceTemplateListHandler: Send + Sync {
    async fn list(&self) -> McpResult<Vec<crate::protocol::types::Resource>>;
}

/// Supplies autocompletion suggestions for one template variable.
#[async_trait]
pub trait TemplateArgumentCompleter: Send + Sync {
    async fn complete(
        &self,
        value: &str,
        context: Option<&CompletionContext>,
    ) -> McpResult<Vec<String>>;
}

/// A registered resource template: metadata, a compiled URI template, a read
/// callback, and optional list/completion callbacks.
pub struct RegisteredResourceTemplate {
    pub name: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub mime_type: Option<String>,
    pub annotations: Option<Annotations>,
    pub template: UriTemplate,
    pub handler: Box<dyn ResourceTemplateHandler>,
    pub list_handler: Option<Box<dyn ResourceTemplateListHandler>>,
    pub complete_callbacks: HashMap<String, Arc<dyn TemplateArgumentCompleter>>,
    pub enabled: bool,
}

impl RegisteredResourceTemplate {
    pub fn new<H>(
        name: String,
        uri_template: String,
        title: Option<String>,
        description: Option<String>,
        mime_type: Option<String>,
        handler: H,
    ) -> McpResult<Self>
    where
        H: ResourceTemplateHandler + 'static,
    {
        Ok(Self {
            name,
            title,
            description,
            mime_type,
            annotations: None,
            template: UriTemplate::new(uri_template)?,
            handler: Box::new(handler),
            list_handler: None,
            complete_callbacks: HashMap::new(),
            enabled: true,
        })
    }

    pub fn with_list_handler<L>(mut self, handler: L) -> Self
    where
        L: ResourceTemplateListHandler + 'static,
    {
        self.list_handler = Some(Box::new(handler));
        self
    }

    pub fn with_completion<C>(mut self, variable: impl Into<String>, completer: C) -> Self
    where
        C: TemplateArgumentCompleter + 'static,
    {
        self.complete_callbacks
            .insert(variable.into(), Arc::new(completer));
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    /// Try to match `uri` against this template. Returns the captured
    /// variables on success.
    pub fn matches(&self, uri: &str) -> Option<HashMap<String, String>> {
        if !self.enabled {
            return None;
        }
        self.template.matches(uri)
    }

    pub async fn read(
        &self,
        uri: &str,
        variables: &HashMap<String, String>,
    ) -> McpResult<Vec<ResourceContents>> {
        if !self.enabled {
            return Err(McpError::validation(format!(
                "Resource template '{}' is disabled",
                self.name
            )));
        }
        self.handler.read(uri, variables).await
    }

    /// Render the wire-level `ResourceTemplate` descriptor for `resources/templates/list`.
    pub fn info(&self) -> ResourceTemplateInfo {
        ResourceTemplateInfo {
            uri_template: self.template.as_str().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            mime_type: self.mime_type.clone(),
            annotations: self.annotations.clone(),
            title: self.title.clone(),
            meta: None,
        }
    }
}

impl std::fmt::Debug for RegisteredResourceTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredResourceTemplate")
            .field("name", &self.name)
            .field("uri_template", &self.template.as_str())
            .field("enabled", &self.enabled)
            .finish()
    }
}
