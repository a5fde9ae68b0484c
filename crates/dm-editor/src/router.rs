//! Tool router: owns the tools and forwards input to the active one.

use crate::input::Event;
use crate::tools::{CreateTool, SelectTool, Tool, ToolContext, ToolKind};

type ToolObserver = Box<dyn FnMut(ToolKind)>;

pub struct ToolRouter {
    create: CreateTool,
    select: SelectTool,
    active: ToolKind,
    observers: Vec<ToolObserver>,
}

impl Default for ToolRouter {
    fn default() -> Self {
        Self::new(CreateTool::default(), SelectTool::new())
    }
}

impl ToolRouter {
    /// The create tool starts out active. Call [`activate`](Self::activate)
    /// once the document exists so it gets its `load`.
    pub fn new(create: CreateTool, select: SelectTool) -> Self {
        Self {
            create,
            select,
            active: ToolKind::Create,
            observers: Vec::new(),
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn tool_name(&self) -> &'static str {
        self.active_tool().name()
    }

    pub fn create_tool(&self) -> &CreateTool {
        &self.create
    }

    pub fn select_tool(&self) -> &SelectTool {
        &self.select
    }

    fn active_tool(&self) -> &dyn Tool {
        match self.active {
            ToolKind::Create => &self.create,
            ToolKind::Select => &self.select,
        }
    }

    fn active_tool_mut(&mut self) -> &mut dyn Tool {
        match self.active {
            ToolKind::Create => &mut self.create,
            ToolKind::Select => &mut self.select,
        }
    }

    /// Load the initial tool.
    pub fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        self.active_tool_mut().load(ctx);
    }

    /// Register a callback run after every effective tool switch.
    pub fn on_tool_changed(&mut self, observer: impl FnMut(ToolKind) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Unload the outgoing tool, load `kind`, then notify. Switching to the
    /// active tool does nothing.
    pub fn set_tool(&mut self, kind: ToolKind, ctx: &mut ToolContext<'_>) {
        if kind == self.active {
            return;
        }
        self.active_tool_mut().unload(ctx);
        self.active = kind;
        self.active_tool_mut().load(ctx);
        log::debug!("tool -> {}", kind.name());
        for observer in &mut self.observers {
            observer(kind);
        }
    }

    pub fn user_input(&mut self, event: Event, ctx: &mut ToolContext<'_>) {
        self.active_tool_mut().user_input(event, ctx);
    }
}
