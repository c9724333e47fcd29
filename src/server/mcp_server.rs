// ! MCP server implementation
// !
// ! Module provides the main MCP server implementation that handles client connections,
// ! manages resources, tools, and prompts, and processes JSON-RPC requests according to
// ! the Model Context Protocol specification.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::core::{
    PromptInfo, ResourceInfo, ToolInfo,
    cancellation::{CancellationRegistry, CancelledNotificationParams},
    completion::{CompletionContext, CompletionHandler},
    error::{McpError, McpResult},
    prompt::{Prompt, PromptHandler},
    resource::{Resource, ResourceHandler},
    resource_template::RegisteredResourceTemplate,
    tool::{Tool, ToolHandler},
};
use crate::protocol::{error_codes::*, messages::*, methods, types::*, validation::*};
use crate::transport::traits::ServerTransport;

/// Configuration for the MCP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of concurrent requests
    pub max_concurrent_requests: usize,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Whether to validate all incoming requests
    pub validate_requests: bool,
    /// Whether to enable detailed logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 100,
            request_timeout_ms: 30000,
            validate_requests: true,
            enable_logging: true,
        }
    }
}

/// Main MCP server implementation
pub struct McpServer {
    /// Server information
    info: ServerInfo,
    /// Server capabilities
    capabilities: ServerCapabilities,
    /// Server configuration
    config: ServerConfig,
    /// Registered resources
    resources: Arc<RwLock<HashMap<String, Resource>>>,
    /// Registered tools
    tools: Arc<RwLock<HashMap<String, Tool>>>,
    /// Registered prompts
    prompts: Arc<RwLock<HashMap<String, Prompt>>>,
    /// Resource templates (New in 2025-06-18)
    resource_templates: Arc<RwLock<Vec<RegisteredResourceTemplate>>>,
    /// Completion handlers (New in 2025-06-18)
    completion_handlers: Arc<RwLock<HashMap<String, Box<dyn CompletionHandler>>>>,
    /// Active transport
    transport: Arc<Mutex<Option<Box<dyn ServerTransport>>>>,
    /// Server state
    state: Arc<RwLock<ServerState>>,
    /// Request ID counter
    #[allow(dead_code)]
    request_counter: Arc<Mutex<u64>>,
    /// URIs the current connection has subscribed to via `resources/subscribe`.
    /// The engine is single-endpoint cooperative: one connection, one
    /// subscriber set.
    subscribed_uris: Arc<RwLock<HashSet<String>>>,
    /// Per-method generation counters backing `notifications/*/list_changed`
    /// debouncing: a burst of changes within the debounce window collapses
    /// to the single send whose generation is still current when its timer
    /// fires.
    debounce_generations: Arc<Mutex<HashMap<&'static str, u64>>>,
    /// Outstanding cancellable requests for this connection, keyed by id.
    /// An inbound `notifications/cancelled` wakes the matching entry.
    cancellation: CancellationRegistry,
}

/// How long a debounced list-changed notification waits for further changes
/// before it is actually written to the transport. The MCP source leaves this
/// unspecified beyond "next microtask"; one millisecond is a close analogue
/// for a multi-threaded async runtime without busy-waiting.
const LIST_CHANGED_DEBOUNCE: Duration = Duration::from_millis(1);

/// Internal server state
#[derive(Debug, Clone, PartialEq)]
pub enum ServerState {
    /// Server is not yet initialized
    Uninitialized,
    /// Server is initializing
    Initializing,
    /// Server is running and ready to accept requests
    Running,
    /// Server is shutting down
    Stopping,
    /// Server has stopped
    Stopped,
}

impl McpServer {
    /// Create a new MCP server with the given name and version
    pub fn new(name: String, version: String) -> Self {
        Self {
            info: ServerInfo::new(name, version),
            capabilities: ServerCapabilities {
                prompts: Some(PromptsCapability {
                    list_changed: Some(true),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(true),
                    list_changed: Some(true),
                }),
                tools: Some(ToolsCapability {
                    list_changed: Some(true),
                }),
                sampling: None,
                logging: None,
                completions: Some(CompletionsCapability::default()),
                experimental: None,
            },
            config: ServerConfig::default(),
            resources: Arc::new(RwLock::new(HashMap::new())),
            tools: Arc::new(RwLock::new(HashMap::new())),
            prompts: Arc::new(RwLock::new(HashMap::new())),
            resource_templates: Arc::new(RwLock::new(Vec::new())),
            completion_handlers: Arc::new(RwLock::new(HashMap::new())),
            transport: Arc::new(Mutex::new(None)),
            state: Arc::new(RwLock::new(ServerState::Uninitialized)),
            request_counter: Arc::new(Mutex::new(0)),
            subscribed_uris: Arc::new(RwLock::new(HashSet::new())),
            debounce_generations: Arc::new(Mutex::new(HashMap::new())),
            cancellation: CancellationRegistry::new(),
        }
    }

    /// Create a new MCP server with custom configuration
    pub fn with_config(name: String, version: String, config: ServerConfig) -> Self {
        let mut server = Self::new(name, version);
        server.config = config;
        server
    }

    /// Set server capabilities
    pub fn set_capabilities(&mut self, capabilities: ServerCapabilities) {
        self.capabilities = capabilities;
    }

    /// Get server information
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Get server name (for compatibility with tests)
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Get server version (for compatibility with tests)
    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// Get server capabilities
    pub fn capabilities(&self) -> &ServerCapabilities {
        &self.capabilities
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    // ========================================================================
    // Resource Management
    // ========================================================================

    /// Add a resource to the server
    pub async fn add_resource<H>(&self, name: String, uri: String, handler: H) -> McpResult<()>
    where
        H: ResourceHandler + 'static,
    {
        let resource_info = ResourceInfo {
            uri: uri.clone(),
            name: name.clone(),
            description: None,
            mime_type: None,
            annotations: None,
            size: None,
            title: None,
            meta: None,
        };

        validate_resource_info(&resource_info)?;

        let resource = Resource::new(resource_info, handler);

        {
            let mut resources = self.resources.write().await;
            resources.insert(uri, resource);
        }

        // Emit list changed notification if we have an active transport
        self.schedule_resources_list_changed().await;

        Ok(())
    }

    /// Add a resource with detailed information
    pub async fn add_resource_detailed<H>(&self, info: ResourceInfo, handler: H) -> McpResult<()>
    where
        H: ResourceHandler + 'static,
    {
        validate_resource_info(&info)?;

        let uri = info.uri.clone();
        let resource = Resource::new(info, handler);

        {
            let mut resources = self.resources.write().await;
            resources.insert(uri, resource);
        }

        self.schedule_resources_list_changed().await;

        Ok(())
    }

    /// Remove a resource from the server
    pub async fn remove_resource(&self, uri: &str) -> McpResult<bool> {
        let removed = {
            let mut resources = self.resources.write().await;
            resources.remove(uri).is_some()
        };

        if removed {
            self.schedule_resources_list_changed().await;
        }

        Ok(removed)
    }

    /// List all registered resources
    pub async fn list_resources(&self) -> McpResult<Vec<ResourceInfo>> {
        let resources = self.resources.read().await;
        Ok(resources.values().map(|r| r.info.clone()).collect())
    }

    /// Read a resource. Exact URIs are tried first; if none match, registered
    /// templates are tried in registration order and the first match wins.
    pub async fn read_resource(&self, uri: &str) -> McpResult<Vec<ResourceContents>> {
        {
            let resources = self.resources.read().await;
            if let Some(resource) = resources.get(uri) {
                let params = HashMap::new();
                return resource.read(uri, &params).await;
            }
        }

        let templates = self.resource_templates.read().await;
        for template in templates.iter() {
            if let Some(variables) = template.matches(uri) {
                return template.read(uri, &variables).await;
            }
        }

        Err(McpError::ResourceNotFound(uri.to_string()))
    }

    // ========================================================================
    // Tool Management
    // ========================================================================

    /// Add a tool to the server
    pub async fn add_tool<H>(
        &self,
        name: String,
        description: Option<String>,
        schema: Value,
        handler: H,
    ) -> McpResult<()>
    where
        H: ToolHandler + 'static,
    {
        let tool_schema = ToolInputSchema {
            schema_type: "object".to_string(),
            properties: schema
                .get("properties")
                .and_then(|p| p.as_object())
                .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            required: schema.get("required").and_then(|r| {
                r.as_array().map(|arr| {
                    arr.iter()
                        .filter_map(|v| v.as_str().map(|s| s.to_string()))
                        .collect()
                })
            }),
            additional_properties: schema
                .as_object()
                .unwrap_or(&serde_json::Map::new())
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };

        let tool_info = ToolInfo {
            name: name.clone(),
            description,
            input_schema: tool_schema,
            output_schema: None,
            annotations: None,
            title: None,
            meta: None,
        };

        validate_tool_info(&tool_info)?;

        let tool = Tool::new(
            name.clone(),
            tool_info.description.clone(),
            serde_json::to_value(&tool_info.input_schema)?,
            handler,
        );

        {
            let mut tools = self.tools.write().await;
            tools.insert(name, tool);
        }

        self.schedule_tools_list_changed().await;

        Ok(())
    }

    /// Add a simple tool with basic schema (convenience method)
    pub async fn add_simple_tool<F>(
        &self,
        name: &str,
        description: &str,
        handler: F,
    ) -> McpResult<()>
    where
        F: Fn(
                std::collections::HashMap<String, serde_json::Value>,
            ) -> McpResult<Vec<crate::protocol::types::ContentBlock>>
            + Send
            + Sync
            + 'static,
    {
        // Create a wrapper that implements ToolHandler
        struct SimpleHandler<F>(F);

        #[async_trait::async_trait]
        impl<F> crate::core::tool::ToolHandler for SimpleHandler<F>
        where
            F: Fn(
                    std::collections::HashMap<String, serde_json::Value>,
                ) -> McpResult<Vec<crate::protocol::types::ContentBlock>>
                + Send
                + Sync
                + 'static,
        {
            async fn call(
                &self,
                arguments: std::collections::HashMap<String, serde_json::Value>,
            ) -> McpResult<crate::protocol::types::ToolResult> {
                let content = (self.0)(arguments)?;
                Ok(crate::protocol::types::ToolResult {
                    content,
                    is_error: Some(false),
                    structured_content: None,
                    meta: None,
                })
            }
        }

        let simple_handler = SimpleHandler(handler);

        // Create a basic schema that accepts any object
        let schema = serde_json::json!({
            "type": "object",
            "properties": {},
            "additionalProperties": true
        });

        self.add_tool(
            name.to_string(),
            Some(description.to_string()),
            schema,
            simple_handler,
        )
        .await
    }

    /// Add a tool with detailed information
    pub async fn add_tool_detailed<H>(&self, info: ToolInfo, handler: H) -> McpResult<()>
    where
        H: ToolHandler + 'static,
    {
        validate_tool_info(&info)?;

        let name = info.name.clone();
        let mut tool = Tool::new(
            name.clone(),
            info.description.clone(),
            serde_json::to_value(&info.input_schema)?,
            handler,
        );
        if let Some(ref output_schema) = info.output_schema {
            tool = tool.with_output_schema(serde_json::to_value(output_schema)?);
        }

        {
            let mut tools = self.tools.write().await;
            tools.insert(name, tool);
        }

        self.schedule_tools_list_changed().await;

        Ok(())
    }

    /// Remove a tool from the server
    pub async fn remove_tool(&self, name: &str) -> McpResult<bool> {
        let removed = {
            let mut tools = self.tools.write().await;
            tools.remove(name).is_some()
        };

        if removed {
            self.schedule_tools_list_changed().await;
        }

        Ok(removed)
    }

    /// List all registered tools
    pub async fn list_tools(&self) -> McpResult<Vec<ToolInfo>> {
        let tools = self.tools.read().await;
        Ok(tools.values().map(|t| t.info.clone()).collect())
    }

    /// Call a tool
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<HashMap<String, Value>>,
    ) -> McpResult<ToolResult> {
        let tools = self.tools.read().await;

        match tools.get(name) {
            Some(tool) => {
                if !tool.enabled {
                    return Err(McpError::ToolNotFound(format!("Tool '{name}' is disabled")));
                }

                let args = arguments.unwrap_or_default();
                tool.call(args).await
            }
            None => Err(McpError::ToolNotFound(name.to_string())),
        }
    }

    // ========================================================================
    // Prompt Management
    // ========================================================================

    /// Add a prompt to the server
    pub async fn add_prompt<H>(&self, info: PromptInfo, handler: H) -> McpResult<()>
    where
        H: PromptHandler + 'static,
    {
        validate_prompt_info(&info)?;

        let name = info.name.clone();
        let prompt = Prompt::new(info, handler);

        {
            let mut prompts = self.prompts.write().await;
            prompts.insert(name, prompt);
        }

        self.schedule_prompts_list_changed().await;

        Ok(())
    }

    /// Remove a prompt from the server
    pub async fn remove_prompt(&self, name: &str) -> McpResult<bool> {
        let removed = {
            let mut prompts = self.prompts.write().await;
            prompts.remove(name).is_some()
        };

        if removed {
            self.schedule_prompts_list_changed().await;
        }

        Ok(removed)
    }

    /// List all registered prompts
    pub async fn list_prompts(&self) -> McpResult<Vec<PromptInfo>> {
        let prompts = self.prompts.read().await;
        Ok(prompts.values().map(|p| p.info.clone()).collect())
    }

    /// Get a prompt
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, Value>>,
    ) -> McpResult<PromptResult> {
        let prompts = self.prompts.read().await;

        match prompts.get(name) {
            Some(prompt) => {
                let args = arguments.unwrap_or_default();
                prompt.get(args).await
            }
            None => Err(McpError::PromptNotFound(name.to_string())),
        }
    }

    // ========================================================================
    // Resource Template Management (New in 2025-06-18)
    // ========================================================================

    /// Register a resource template: a URI pattern with variables plus a
    /// callback that reads the matching resource. Templates are tried, in
    /// registration order, only after an exact resource URI match fails.
    pub async fn add_resource_template(
        &self,
        template: RegisteredResourceTemplate,
    ) -> McpResult<()> {
        {
            let mut templates = self.resource_templates.write().await;
            templates.retain(|t| t.name != template.name);
            templates.push(template);
        }

        self.schedule_resource_templates_list_changed().await;
        Ok(())
    }

    /// List resource templates
    pub async fn list_resource_templates(&self) -> McpResult<Vec<ResourceTemplate>> {
        let templates = self.resource_templates.read().await;
        Ok(templates.iter().map(|t| t.info()).collect())
    }

    /// Remove a resource template
    pub async fn remove_resource_template(&self, name: &str) -> McpResult<bool> {
        let removed = {
            let mut templates = self.resource_templates.write().await;
            let before = templates.len();
            templates.retain(|t| t.name != name);
            templates.len() != before
        };

        if removed {
            self.schedule_resource_templates_list_changed().await;
        }

        Ok(removed)
    }

    // ========================================================================
    // Completion Management (New in 2025-06-18)
    // ========================================================================

    /// Add completion handler for a specific reference type
    pub async fn add_completion_handler<H>(&self, ref_type: String, handler: H) -> McpResult<()>
    where
        H: CompletionHandler + 'static,
    {
        let mut handlers = self.completion_handlers.write().await;
        handlers.insert(ref_type, Box::new(handler));
        Ok(())
    }

    /// Remove completion handler for a reference type
    pub async fn remove_completion_handler(&self, ref_type: &str) -> McpResult<bool> {
        let mut handlers = self.completion_handlers.write().await;
        Ok(handlers.remove(ref_type).is_some())
    }

    /// Handle completion request
    pub async fn handle_completion(
        &self,
        reference: &CompletionReference,
        argument: &CompletionArgument,
        context: Option<&CompletionContext>,
    ) -> McpResult<Vec<String>> {
        if let CompletionReference::Resource { uri } = reference {
            let templates = self.resource_templates.read().await;
            if let Some(template) = templates.iter().find(|t| t.template.as_str() == uri) {
                if let Some(completer) = template.complete_callbacks.get(&argument.name) {
                    return completer.complete(&argument.value, context).await;
                }
            }
        }

        let ref_type = match reference {
            CompletionReference::Prompt { .. } => "ref/prompt",
            CompletionReference::Resource { .. } => "ref/resource",
            CompletionReference::Tool { .. } => "ref/tool",
        };

        let handlers = self.completion_handlers.read().await;
        if let Some(handler) = handlers.get(ref_type) {
            handler.complete(reference, argument, context).await
        } else {
            // Return empty completions if no handler is registered
            Ok(vec![])
        }
    }

    // ========================================================================
    // Bidirectional Communication (New in 2025-06-18)
    // ========================================================================

    /// Send a request to the client (server-initiated)
    pub async fn send_client_request(
        &self,
        _request: JsonRpcRequest,
    ) -> McpResult<JsonRpcResponse> {
        let mut transport_guard = self.transport.lock().await;
        if let Some(_transport) = transport_guard.as_mut() {
            // For now, return an error - this would need transport-specific implementation
            Err(McpError::MethodNotFound(
                "Bidirectional communication not yet fully implemented".to_string(),
            ))
        } else {
            Err(McpError::Transport("Not connected".to_string()))
        }
    }

    /// Request LLM sampling from client
    pub async fn request_sampling(
        &self,
        params: CreateMessageParams,
    ) -> McpResult<CreateMessageResult> {
        let request = JsonRpcRequest::new(
            Value::from(self.next_request_id().await),
            methods::SAMPLING_CREATE_MESSAGE.to_string(),
            Some(params),
        )?;

        let response = self.send_client_request(request).await?;

        if let Some(result) = response.result {
            Ok(serde_json::from_value(result)?)
        } else {
            Err(McpError::Protocol("No result in response".to_string()))
        }
    }

    /// Request root directories from client
    pub async fn request_roots(&self) -> McpResult<ListRootsResult> {
        let request = JsonRpcRequest::new(
            Value::from(self.next_request_id().await),
            methods::ROOTS_LIST.to_string(),
            Some(ListRootsParams { meta: None }),
        )?;

        let response = self.send_client_request(request).await?;

        if let Some(result) = response.result {
            Ok(serde_json::from_value(result)?)
        } else {
            Err(McpError::Protocol("No result in response".to_string()))
        }
    }

    /// Request user input via elicitation
    pub async fn request_elicitation(&self, params: ElicitParams) -> McpResult<ElicitResult> {
        let request = JsonRpcRequest::new(
            Value::from(self.next_request_id().await),
            methods::ELICITATION_CREATE.to_string(),
            Some(params),
        )?;

        let response = self.send_client_request(request).await?;

        if let Some(result) = response.result {
            Ok(serde_json::from_value(result)?)
        } else {
            Err(McpError::Protocol("No result in response".to_string()))
        }
    }

    /// Request list of roots from the client
    ///
    /// Method allows the server to request access to specific directories
    /// or files on the client's file system.
    pub async fn request_list_roots(&self) -> McpResult<ListRootsResult> {
        let request = JsonRpcRequest::new(
            Value::from(self.next_request_id().await),
            methods::ROOTS_LIST.to_string(),
            None::<serde_json::Value>,
        )?;

        let response = self.send_client_request(request).await?;

        if let Some(result) = response.result {
            Ok(serde_json::from_value(result)?)
        } else {
            Err(McpError::Protocol("No result in response".to_string()))
        }
    }

    /// Send a notification that the roots list has changed
    ///
    /// This notification informs the client that the list of roots
    /// the server needs access to has changed.
    pub async fn notify_roots_list_changed(&self) -> McpResult<()> {
        let notification = JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: methods::ROOTS_LIST_CHANGED.to_string(),
            params: None,
        };

        if let Some(ref mut transport) = *self.transport.lock().await {
            transport.send_notification(notification).await
        } else {
            Err(McpError::Connection("No transport available".to_string()))
        }
    }

    // ========================================================================
    // Server Lifecycle
    // ========================================================================

    /// Start the server with the given transport
    pub async fn start<T>(&mut self, mut transport: T) -> McpResult<()>
    where
        T: ServerTransport + 'static,
    {
        let mut state = self.state.write().await;

        match *state {
            ServerState::Uninitialized => {
                *state = ServerState::Initializing;
            }
            _ => return Err(McpError::Protocol("Server is already started".to_string())),
        }

        drop(state);

        // Create a request handler that delegates to this server
        let resources = self.resources.clone();
        let tools = self.tools.clone();
        let prompts = self.prompts.clone();
        let resource_templates = self.resource_templates.clone();
        let completion_handlers = self.completion_handlers.clone();
        let info = self.info.clone();
        let capabilities = self.capabilities.clone();
        let config = self.config.clone();
        let subscribed_uris = self.subscribed_uris.clone();
        let debounce_generations = self.debounce_generations.clone();
        let shared_transport = self.transport.clone();
        let cancellation = self.cancellation.clone();

        let request_handler: crate::transport::traits::ServerRequestHandler = {
            let resources = resources.clone();
            let tools = tools.clone();
            let prompts = prompts.clone();
            let resource_templates = resource_templates.clone();
            let completion_handlers = completion_handlers.clone();
            let info = info.clone();
            let capabilities = capabilities.clone();
            let config = config.clone();
            let subscribed_uris = subscribed_uris.clone();
            let debounce_generations = debounce_generations.clone();
            let shared_transport = shared_transport.clone();
            let cancellation = cancellation.clone();

            Arc::new(move |request| {
                let resources = resources.clone();
                let tools = tools.clone();
                let prompts = prompts.clone();
                let resource_templates = resource_templates.clone();
                let completion_handlers = completion_handlers.clone();
                let info = info.clone();
                let capabilities = capabilities.clone();
                let config = config.clone();
                let subscribed_uris = subscribed_uris.clone();
                let debounce_generations = debounce_generations.clone();
                let shared_transport = shared_transport.clone();
                let cancellation = cancellation.clone();

                Box::pin(async move {
                    // Dispatch through a view over this connection's shared
                    // state (registries, subscriptions, debounce generations,
                    // transport) rather than the owning `McpServer`, since the
                    // transport hands requests to this closure without a
                    // reference back to it.
                    let temp_server = McpServer {
                        info,
                        capabilities,
                        config,
                        resources,
                        tools,
                        prompts,
                        resource_templates,
                        completion_handlers,
                        transport: shared_transport,
                        state: Arc::new(RwLock::new(ServerState::Running)),
                        request_counter: Arc::new(Mutex::new(0)),
                        subscribed_uris,
                        debounce_generations,
                        cancellation,
                    };
                    temp_server.handle_request(request).await
                })
            })
        };

        // Set the request handler on the transport
        transport.set_request_handler(request_handler);

        // Set the notification handler (e.g. `notifications/cancelled`) on
        // the transport, dispatching through the same shared connection
        // state the request handler uses.
        let notification_handler: crate::transport::traits::ServerNotificationHandler = {
            let cancellation = cancellation.clone();
            Arc::new(move |notification| {
                let cancellation = cancellation.clone();
                Box::pin(async move {
                    McpServer::dispatch_notification(&cancellation, notification).await;
                })
            })
        };
        transport.set_notification_handler(notification_handler);

        // Session-oriented transports (HTTP) invoke this once a session is
        // torn down and its in-flight SSE has drained (spec §4.4.2/§6/§9).
        // This server has no per-session state to release today; the hook
        // just makes the teardown observable in logs.
        let session_closed_handler: crate::transport::traits::SessionClosedHandler =
            Arc::new(move |session_id: String| {
                Box::pin(async move {
                    tracing::debug!(session_id = %session_id, "MCP session closed");
                })
            });
        transport.set_session_closed_handler(session_closed_handler);

        // Set up the transport
        {
            let mut transport_guard = self.transport.lock().await;
            *transport_guard = Some(Box::new(transport));
        }

        // Start the transport
        {
            let mut transport_guard = self.transport.lock().await;
            if let Some(transport) = transport_guard.as_mut() {
                transport.start().await?;
            }
        }

        // Update state to running
        {
            let mut state = self.state.write().await;
            *state = ServerState::Running;
        }

        Ok(())
    }

    /// Stop the server
    pub async fn stop(&self) -> McpResult<()> {
        let mut state = self.state.write().await;

        match *state {
            ServerState::Running => {
                *state = ServerState::Stopping;
            }
            ServerState::Stopped => return Ok(()),
            _ => return Err(McpError::Protocol("Server is not running".to_string())),
        }

        drop(state);

        // Stop the transport
        {
            let mut transport_guard = self.transport.lock().await;
            if let Some(transport) = transport_guard.as_mut() {
                transport.stop().await?;
            }
        }

        // Update state to stopped
        {
            let mut state = self.state.write().await;
            *state = ServerState::Stopped;
        }

        Ok(())
    }

    /// Check if the server is running
    pub async fn is_running(&self) -> bool {
        let state = self.state.read().await;
        matches!(*state, ServerState::Running)
    }

    /// Get the current server state
    pub async fn state(&self) -> ServerState {
        let state = self.state.read().await;
        state.clone()
    }

    /// Start server with STDIO transport and run until interrupted (convenience method)
    ///
    /// This is a convenience method that:
    /// 1. Creates a STDIO transport
    /// 2. Starts the server
    /// 3. Waits for Ctrl+C signal
    /// 4. smoothly shuts down the server
    ///
    /// # Example
    /// ```rust,no_run
    /// use mcp_engine::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() -> McpResult<()> {
    /// let mut server = McpServer::new("my-server".to_string(), "1.0.0".to_string());
    /// // . add tools, resources, prompts ...
    /// server.run_with_stdio().await
    /// }
    /// ```
    #[cfg(feature = "stdio")]
    pub async fn run_with_stdio(mut self) -> McpResult<()> {
        use crate::transport::stdio::StdioServerTransport;

        let transport = StdioServerTransport::new();
        self.start(transport).await?;

        tracing::info!("Server started with STDIO transport. Press Ctrl+C to stop.");

        // Wait for shutdown signal
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| McpError::internal(format!("Signal handling error: {e}")))?;

        tracing::info!("Shutdown signal received, stopping server...");
        self.stop().await
    }

    /// Start server with custom transport and run until interrupted
    ///
    /// This is a convenience method that:
    /// 1. Starts the server with the provided transport
    /// 2. Waits for Ctrl+C signal
    /// 3. smoothly shuts down the server
    ///
    /// # Arguments
    /// * `transport` - The transport to use for communication
    ///
    /// # Example
    /// ```rust,no_run
    /// use mcp_engine::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() -> McpResult<()> {
    /// let mut server = McpServer::new("my-server".to_string(), "1.0.0".to_string());
    /// // . add tools, resources, prompts ...
    ///
    /// let transport = StdioServerTransport::new();
    /// server.run_with_transport(transport).await
    /// }
    /// ```
    pub async fn run_with_transport<T>(mut self, transport: T) -> McpResult<()>
    where
        T: ServerTransport + 'static,
    {
        self.start(transport).await?;

        tracing::info!("Server started. Press Ctrl+C to stop.");

        // Wait for shutdown signal
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| McpError::internal(format!("Signal handling error: {e}")))?;

        tracing::info!("Shutdown signal received, stopping server...");
        self.stop().await
    }

    /// Start server with HTTP transport and run until interrupted (convenience method)
    ///
    /// This is a convenience method that:
    /// 1. Creates an HTTP transport bound to the specified address
    /// 2. Starts the server
    /// 3. Waits for Ctrl+C signal
    /// 4. smoothly shuts down the server
    ///
    /// # Arguments
    /// * `bind_addr` - The address to bind the HTTP server to (e.g., "127.0.0.1:3000")
    ///
    /// # Example
    /// ```rust,no_run
    /// use mcp_engine::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() -> McpResult<()> {
    /// let mut server = McpServer::new("my-server".to_string(), "1.0.0".to_string());
    /// // . add tools, resources, prompts ...
    /// server.run_with_http("127.0.0.1:3000").await
    /// }
    /// ```
    #[cfg(feature = "http")]
    pub async fn run_with_http(mut self, bind_addr: &str) -> McpResult<()> {
        use crate::transport::http::HttpServerTransport;

        let transport = HttpServerTransport::new(bind_addr.to_string());
        self.start(transport).await?;

        tracing::info!(
            "Server started with HTTP transport on {}. Press Ctrl+C to stop.",
            bind_addr
        );

        // Wait for shutdown signal
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| McpError::internal(format!("Signal handling error: {e}")))?;

        tracing::info!("Shutdown signal received, stopping server...");
        self.stop().await
    }

    /// Start server with WebSocket transport and run until interrupted (convenience method)
    ///
    /// This is a convenience method that:
    /// 1. Creates a WebSocket transport bound to the specified address
    /// 2. Starts the server
    /// 3. Waits for Ctrl+C signal
    /// 4. smoothly shuts down the server
    ///
    /// # Arguments
    /// * `bind_addr` - The address to bind the WebSocket server to (e.g., "127.0.0.1:8080")
    ///
    /// # Example
    /// ```rust,no_run
    /// use mcp_engine::prelude::*;
    ///
    /// #[tokio::main]
    /// async fn main() -> McpResult<()> {
    /// let mut server = McpServer::new("my-server".to_string(), "1.0.0".to_string());
    /// // . add tools, resources, prompts ...
    /// server.run_with_websocket("127.0.0.1:8080").await
    /// }
    /// ```
    #[cfg(feature = "websocket")]
    pub async fn run_with_websocket(mut self, bind_addr: &str) -> McpResult<()> {
        use crate::transport::websocket::WebSocketServerTransport;

        let transport = WebSocketServerTransport::new(bind_addr.to_string());
        self.start(transport).await?;

        tracing::info!(
            "Server started with WebSocket transport on {}. Press Ctrl+C to stop.",
            bind_addr
        );

        // Wait for shutdown signal
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| McpError::internal(format!("Signal handling error: {e}")))?;

        tracing::info!("Shutdown signal received, stopping server...");
        self.stop().await
    }

    // ========================================================================
    // Request Handling
    // ========================================================================

    /// Handle an incoming JSON-RPC request.
    ///
    /// Always returns `Ok` with either a result or an error response: per the
    /// data model, a request that reaches this far always gets exactly one
    /// reply on the wire. `Err` is reserved for failures in validating the
    /// envelope itself before a response object can be built at all.
    pub async fn handle_request(
        &self,
        request: JsonRpcRequest,
    ) -> McpResult<Option<JsonRpcResponseOrError>> {
        // Validate the request if configured to do so
        if self.config.validate_requests {
            if let Err(error) = validate_jsonrpc_request(&request)
                .and_then(|_| validate_mcp_request(&request.method, request.params.as_ref()))
            {
                return Ok(Some(JsonRpcResponseOrError::Error(JsonRpcError::error(
                    request.id,
                    INVALID_REQUEST,
                    error.to_string(),
                    None,
                ))));
            }
        }

        let is_known_method = matches!(
            request.method.as_str(),
            methods::INITIALIZE
                | methods::PING
                | methods::TOOLS_LIST
                | methods::TOOLS_CALL
                | methods::RESOURCES_LIST
                | methods::RESOURCES_READ
                | methods::RESOURCES_SUBSCRIBE
                | methods::RESOURCES_UNSUBSCRIBE
                | methods::PROMPTS_LIST
                | methods::PROMPTS_GET
                | methods::RESOURCES_TEMPLATES_LIST
                | methods::COMPLETION_COMPLETE
                | methods::LOGGING_SET_LEVEL
                | methods::RPC_DISCOVER
        );

        if !is_known_method {
            return Ok(Some(JsonRpcResponseOrError::Error(JsonRpcError::error(
                request.id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
                None,
            ))));
        }

        // Methods whose work can genuinely run long enough to be worth
        // cancelling (spec §4.5: `rpc.discover`'s introspection, table
        // lookups, and config toggles are not).
        let is_cancellable = matches!(
            request.method.as_str(),
            methods::TOOLS_CALL
                | methods::RESOURCES_READ
                | methods::PROMPTS_GET
                | methods::COMPLETION_COMPLETE
        );

        // Route the request to the appropriate handler
        let dispatch = async {
            match request.method.as_str() {
                methods::INITIALIZE => self.handle_initialize(request.params.clone()).await,
                methods::PING => self.handle_ping().await,
                methods::TOOLS_LIST => self.handle_tools_list(request.params.clone()).await,
                methods::TOOLS_CALL => self.handle_tools_call(request.params.clone()).await,
                methods::RESOURCES_LIST => self.handle_resources_list(request.params.clone()).await,
                methods::RESOURCES_READ => self.handle_resources_read(request.params.clone()).await,
                methods::RESOURCES_SUBSCRIBE => {
                    self.handle_resources_subscribe(request.params.clone()).await
                }
                methods::RESOURCES_UNSUBSCRIBE => {
                    self.handle_resources_unsubscribe(request.params.clone()).await
                }
                methods::PROMPTS_LIST => self.handle_prompts_list(request.params.clone()).await,
                methods::PROMPTS_GET => self.handle_prompts_get(request.params.clone()).await,
                methods::RESOURCES_TEMPLATES_LIST => {
                    self.handle_resource_templates_list(request.params.clone()).await
                }
                methods::COMPLETION_COMPLETE => {
                    self.handle_completion_complete(request.params.clone()).await
                }
                methods::LOGGING_SET_LEVEL => {
                    self.handle_logging_set_level(request.params.clone()).await
                }
                methods::RPC_DISCOVER => self.handle_rpc_discover(request.params.clone()).await,
                _ => unreachable!("checked by is_known_method above"),
            }
        };

        let result = if is_cancellable {
            let notify = self.cancellation.register(request.id.clone()).await;
            let deadline = std::time::Duration::from_millis(self.config.request_timeout_ms);
            enum Outcome {
                Completed(McpResult<serde_json::Value>),
                Cancelled,
                TimedOut,
            }
            let outcome = tokio::select! {
                result = tokio::time::timeout(deadline, dispatch) => {
                    match result {
                        Ok(value) => Outcome::Completed(value),
                        Err(_) => Outcome::TimedOut,
                    }
                }
                _ = notify.notified() => Outcome::Cancelled,
            };
            self.cancellation.complete(&request.id).await;
            match outcome {
                Outcome::Completed(result) => result,
                Outcome::Cancelled => {
                    // Spec §8 scenario 6: a cancelled request's eventual
                    // result, if any, is discarded, and no response for
                    // this id reaches the wire at all — not even an error
                    // frame — so the caller that already gave up on
                    // correlating id `request.id` never sees a stray
                    // late answer.
                    return Ok(None);
                }
                Outcome::TimedOut => {
                    // Spec §4.5: local timer expired before the handler
                    // produced a result; the remote peer is not notified,
                    // any late result is silently discarded.
                    return Ok(Some(JsonRpcResponseOrError::Error(JsonRpcError::error(
                        request.id,
                        REQUEST_TIMEOUT,
                        "Request timeout".to_string(),
                        None,
                    ))));
                }
            }
        } else {
            dispatch.await
        };

        // Convert the result to a JSON-RPC response
        match result {
            Ok(result_value) => Ok(Some(JsonRpcResponseOrError::Response(
                JsonRpcResponse::success(request.id, result_value)?,
            ))),
            Err(error) => {
                // Per the registry dispatch contract (tool/resource/prompt not
                // found, disabled, or failing schema validation) all surface
                // as InvalidParams; only a genuinely unhandled failure is
                // InternalError.
                let code = match error {
                    McpError::ToolNotFound(_)
                    | McpError::ResourceNotFound(_)
                    | McpError::PromptNotFound(_)
                    | McpError::Validation(_)
                    | McpError::InvalidParams(_) => INVALID_PARAMS,
                    McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
                    _ => INTERNAL_ERROR,
                };
                Ok(Some(JsonRpcResponseOrError::Error(JsonRpcError::error(
                    request.id,
                    code,
                    error.to_string(),
                    None,
                ))))
            }
        }
    }

    /// Handle an inbound notification from the client.
    ///
    /// Unknown notification methods are silently dropped per spec §4.5
    /// ("Receiving a message" — notification handling). Only
    /// `notifications/cancelled` currently needs server-side action.
    pub async fn handle_notification(&self, notification: JsonRpcNotification) {
        Self::dispatch_notification(&self.cancellation, notification).await;
    }

    async fn dispatch_notification(
        cancellation: &CancellationRegistry,
        notification: JsonRpcNotification,
    ) {
        match notification.method.as_str() {
            methods::CANCELLED => {
                let Some(params) = notification.params else {
                    tracing::debug!("notifications/cancelled with no params, ignoring");
                    return;
                };
                match serde_json::from_value::<CancelledNotificationParams>(params) {
                    Ok(params) => {
                        let cancelled = cancellation.cancel(&params.request_id).await;
                        tracing::debug!(
                            request_id = ?params.request_id,
                            reason = params.reason.as_deref().unwrap_or(""),
                            cancelled,
                            "handled notifications/cancelled"
                        );
                    }
                    Err(e) => {
                        tracing::warn!("malformed notifications/cancelled params: {e}");
                    }
                }
            }
            other => {
                tracing::trace!("ignoring notification: {other}");
            }
        }
    }

    // ========================================================================
    // Individual Request Handlers
    // ========================================================================

    async fn handle_initialize(&self, params: Option<Value>) -> McpResult<Value> {
        let params: InitializeParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing initialize parameters".to_string(),
                ));
            }
        };

        validate_initialize_params(&params)?;

        let result = InitializeResult::new(
            crate::protocol::LATEST_PROTOCOL_VERSION.to_string(),
            self.capabilities.clone(),
            self.info.clone(),
        );

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_ping(&self) -> McpResult<Value> {
        Ok(serde_json::to_value(PingResult { meta: None })?)
    }

    async fn handle_tools_list(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: ListToolsParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => ListToolsParams::default(),
        };

        let tools = self.list_tools().await?;
        let result = ListToolsResult {
            tools,
            next_cursor: None, // Pagination support will be added in future versions
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> McpResult<Value> {
        let params: CallToolParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing tool call parameters".to_string(),
                ));
            }
        };

        validate_call_tool_params(&params)?;

        let result = self.call_tool(&params.name, params.arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    async fn handle_resources_list(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: ListResourcesParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => ListResourcesParams::default(),
        };

        let resources = self.list_resources().await?;
        let result = ListResourcesResult {
            resources,
            next_cursor: None, // Pagination support will be added in future versions
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> McpResult<Value> {
        let params: ReadResourceParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing resource read parameters".to_string(),
                ));
            }
        };

        validate_read_resource_params(&params)?;

        let contents = self.read_resource(&params.uri).await?;
        let result = ReadResourceResult {
            contents,
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_resources_subscribe(&self, params: Option<Value>) -> McpResult<Value> {
        let params: SubscribeResourceParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing resource subscribe parameters".to_string(),
                ));
            }
        };

        {
            let mut subscribed = self.subscribed_uris.write().await;
            subscribed.insert(params.uri);
        }
        let result = SubscribeResourceResult { meta: None };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_resources_unsubscribe(&self, params: Option<Value>) -> McpResult<Value> {
        let params: UnsubscribeResourceParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing resource unsubscribe parameters".to_string(),
                ));
            }
        };

        {
            let mut subscribed = self.subscribed_uris.write().await;
            subscribed.remove(&params.uri);
        }
        let result = UnsubscribeResourceResult { meta: None };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_prompts_list(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: ListPromptsParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => ListPromptsParams::default(),
        };

        let prompts = self.list_prompts().await?;
        let result = ListPromptsResult {
            prompts,
            next_cursor: None, // Pagination support will be added in future versions
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> McpResult<Value> {
        let params: GetPromptParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing prompt get parameters".to_string(),
                ));
            }
        };

        validate_get_prompt_params(&params)?;

        let arguments = params.arguments.map(|args| {
            args.into_iter()
                .map(|(k, v)| (k, serde_json::Value::String(v)))
                .collect()
        });
        let result = self.get_prompt(&params.name, arguments).await?;
        Ok(serde_json::to_value(result)?)
    }

    async fn handle_logging_set_level(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: SetLoggingLevelParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing logging level parameters".to_string(),
                ));
            }
        };

        // Logging level management feature planned for future implementation
        let result = SetLoggingLevelResult { meta: None };
        Ok(serde_json::to_value(result)?)
    }

    /// Handle resource templates list request (New in 2025-06-18)
    async fn handle_resource_templates_list(&self, params: Option<Value>) -> McpResult<Value> {
        let _params: ListResourceTemplatesParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => ListResourceTemplatesParams::default(),
        };

        let templates = self.list_resource_templates().await?;
        let result = ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None, // Pagination support will be added in future versions
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle completion request (New in 2025-06-18)
    async fn handle_completion_complete(&self, params: Option<Value>) -> McpResult<Value> {
        let params: CompleteParams = match params {
            Some(p) => serde_json::from_value(p)?,
            None => {
                return Err(McpError::Validation(
                    "Missing completion parameters".to_string(),
                ));
            }
        };

        let mut completions = self
            .handle_completion(
                &params.reference,
                &params.argument,
                params.context.as_ref(),
            )
            .await?;

        const MAX_COMPLETIONS: usize = 100;
        let total = completions.len();
        let has_more = total > MAX_COMPLETIONS;
        completions.truncate(MAX_COMPLETIONS);

        let result = CompleteResult {
            completion: CompletionData {
                values: completions,
                total: Some(total as u32),
                has_more: Some(has_more),
            },
            meta: None,
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle RPC discovery request (Optional discovery mechanism)
    async fn handle_rpc_discover(&self, params: Option<Value>) -> McpResult<Value> {
        use crate::server::discovery_handler::DiscoveryHandler;

        let handler = DiscoveryHandler::new();
        let result = handler
            .handle(&self.info, &self.capabilities, params)
            .await?;
        Ok(serde_json::to_value(result)?)
    }

    // ========================================================================
    // Notification Helpers
    // ========================================================================

    /// Schedule a debounced `notifications/resources/list_changed`.
    async fn schedule_resources_list_changed(&self) {
        let advertised = self
            .capabilities
            .resources
            .as_ref()
            .is_some_and(|r| r.list_changed.unwrap_or(false));
        self.schedule_list_changed(methods::RESOURCES_LIST_CHANGED, advertised, || {
            JsonRpcNotification::new(
                methods::RESOURCES_LIST_CHANGED.to_string(),
                Some(ResourceListChangedParams { meta: None }),
            )
        })
        .await;
    }

    /// Schedule a debounced `notifications/tools/list_changed`.
    async fn schedule_tools_list_changed(&self) {
        let advertised = self
            .capabilities
            .tools
            .as_ref()
            .is_some_and(|t| t.list_changed.unwrap_or(false));
        self.schedule_list_changed(methods::TOOLS_LIST_CHANGED, advertised, || {
            JsonRpcNotification::new(
                methods::TOOLS_LIST_CHANGED.to_string(),
                Some(ToolListChangedParams { meta: None }),
            )
        })
        .await;
    }

    /// Schedule a debounced `notifications/prompts/list_changed`.
    async fn schedule_prompts_list_changed(&self) {
        let advertised = self
            .capabilities
            .prompts
            .as_ref()
            .is_some_and(|p| p.list_changed.unwrap_or(false));
        self.schedule_list_changed(methods::PROMPTS_LIST_CHANGED, advertised, || {
            JsonRpcNotification::new(
                methods::PROMPTS_LIST_CHANGED.to_string(),
                Some(PromptListChangedParams { meta: None }),
            )
        })
        .await;
    }

    /// Schedule a debounced `notifications/resources/list_changed` for a
    /// resource-template change. Templates are advertised under the same
    /// `resources` capability as exact resources.
    async fn schedule_resource_templates_list_changed(&self) {
        self.schedule_resources_list_changed().await;
    }

    /// Coalesce rapid successive calls for `method` into a single emission.
    /// Each call bumps a per-method generation counter and spawns a task that
    /// sleeps for [`LIST_CHANGED_DEBOUNCE`]; when the sleep completes, the
    /// task only sends if its generation is still the latest one recorded —
    /// otherwise a later call has already taken over the send.
    async fn schedule_list_changed(
        &self,
        method: &'static str,
        capability_advertised: bool,
        build: impl Fn() -> McpResult<JsonRpcNotification> + Send + 'static,
    ) {
        if !capability_advertised {
            return;
        }

        let generation = {
            let mut generations = self.debounce_generations.lock().await;
            let slot = generations.entry(method).or_insert(0);
            *slot += 1;
            *slot
        };

        let generations = self.debounce_generations.clone();
        let transport = self.transport.clone();

        tokio::spawn(async move {
            tokio::time::sleep(LIST_CHANGED_DEBOUNCE).await;

            let still_current = {
                let map = generations.lock().await;
                map.get(method).copied().unwrap_or(0) == generation
            };
            if !still_current {
                return;
            }

            let notification = match build() {
                Ok(n) => n,
                Err(e) => {
                    tracing::error!("Failed to build {} notification: {}", method, e);
                    return;
                }
            };

            let mut guard = transport.lock().await;
            if let Some(t) = guard.as_mut() {
                if let Err(e) = t.send_notification(notification).await {
                    tracing::warn!("Failed to send {} notification: {}", method, e);
                }
            }
        });
    }

    /// Notify every session subscribed to `uri` that its contents changed.
    /// Emits `notifications/resources/updated` immediately (not debounced —
    /// Updates for a given session must serialize in call order, which a coalescing
    /// delay would violate).
    pub async fn send_resource_updated(&self, uri: &str) -> McpResult<()> {
        let subscribed = {
            let subscriptions = self.subscribed_uris.read().await;
            subscriptions.contains(uri)
        };
        if !subscribed {
            return Ok(());
        }

        let notification = JsonRpcNotification::new(
            methods::RESOURCES_UPDATED.to_string(),
            Some(ResourceUpdatedParams {
                uri: uri.to_string(),
            }),
        )?;

        self.send_notification(notification).await
    }

    /// Send a notification through the transport
    async fn send_notification(&self, notification: JsonRpcNotification) -> McpResult<()> {
        let mut transport_guard = self.transport.lock().await;
        if let Some(transport) = transport_guard.as_mut() {
            transport.send_notification(notification).await?;
        }
        Ok(())
    }

    // ========================================================================
    // Utility Methods
    // ========================================================================

    async fn next_request_id(&self) -> u64 {
        let mut counter = self.request_counter.lock().await;
        *counter += 1;
        *counter
    }

    // ========================================================================
    // State Management & Convenience Methods
    // ========================================================================

    /// Check if the server has been initialized
    pub async fn is_initialized(&self) -> bool {
        let state = self.state.read().await;
        matches!(*state, ServerState::Running)
    }

    /// Check if the server is stopping or stopped
    pub async fn is_stopped(&self) -> bool {
        let state = self.state.read().await;
        matches!(*state, ServerState::Stopping | ServerState::Stopped)
    }

    /// Get the current server state (alias for existing state method)
    pub async fn get_state(&self) -> ServerState {
        self.state().await
    }

    /// Check if the server has any registered tools
    pub async fn has_tools(&self) -> bool {
        let tools = self.tools.read().await;
        !tools.is_empty()
    }

    /// Check if the server has any registered resources
    pub async fn has_resources(&self) -> bool {
        let resources = self.resources.read().await;
        !resources.is_empty()
    }

    /// Check if the server has any registered prompts
    pub async fn has_prompts(&self) -> bool {
        let prompts = self.prompts.read().await;
        !prompts.is_empty()
    }

    /// Get the number of registered tools
    pub async fn tool_count(&self) -> usize {
        let tools = self.tools.read().await;
        tools.len()
    }

    /// Get the number of registered resources
    pub async fn resource_count(&self) -> usize {
        let resources = self.resources.read().await;
        resources.len()
    }

    /// Get the number of registered prompts
    pub async fn prompt_count(&self) -> usize {
        let prompts = self.prompts.read().await;
        prompts.len()
    }

    /// Check if a specific tool is registered
    pub async fn has_tool(&self, name: &str) -> bool {
        let tools = self.tools.read().await;
        tools.contains_key(name)
    }

    /// Check if a specific resource is registered
    pub async fn has_resource(&self, uri: &str) -> bool {
        let resources = self.resources.read().await;
        resources.contains_key(uri)
    }

    /// Check if a specific prompt is registered
    pub async fn has_prompt(&self, name: &str) -> bool {
        let prompts = self.prompts.read().await;
        prompts.contains_key(name)
    }

    /// Set the server state (internal use)
    async fn set_state(&self, new_state: ServerState) {
        let mut state = self.state.write().await;
        *state = new_state;
    }

    /// Initialize the server (sets state to Running)
    pub async fn initialize(&self) -> McpResult<()> {
        self.set_state(ServerState::Running).await;
        Ok(())
    }
}
