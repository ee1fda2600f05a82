//! Process-wide rendering context.
//!
//! A [`Session`] owns everything that outlives a single frame: the
//! modification flag stack, custom hooks, undo histories, autosave timers,
//! the LaTeX image cache, configuration and the clock. Create one per
//! application and open a [`Renderer`] on it every frame.

use crate::autosave::AutosaveRegistry;
use crate::backend::WidgetBackend;
use crate::cache::LatexRenderer;
use crate::clock::{Clock, SystemClock};
use crate::config::AutoGuiConfig;
use crate::history::HistoryRegistry;
use crate::hooks::{HookRegistry, RenderHook};
use crate::modflag::ModStack;
use crate::render::Renderer;

pub struct Session {
    pub(crate) mods: ModStack,
    pub(crate) hooks: HookRegistry,
    pub(crate) histories: HistoryRegistry,
    pub(crate) autosaves: AutosaveRegistry,
    latex: Option<LatexRenderer>,
    pub(crate) config: AutoGuiConfig,
    pub(crate) clock: Box<dyn Clock>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AutoGuiConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("hooks", &self.hooks)
            .field("histories", &self.histories)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(config: AutoGuiConfig) -> Self {
        Self::with_clock(config, SystemClock::default())
    }

    pub fn with_clock(config: AutoGuiConfig, clock: impl Clock + 'static) -> Self {
        Self {
            mods: ModStack::new(),
            hooks: HookRegistry::default(),
            histories: HistoryRegistry::new(),
            autosaves: AutosaveRegistry::default(),
            latex: None,
            config,
            clock: Box::new(clock),
        }
    }

    /// Register a custom hook for records named `type_name`.
    pub fn register_hook(&mut self, type_name: impl Into<String>, hook: impl RenderHook + 'static) {
        self.hooks.register(type_name, hook);
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hooks
    }

    /// Start a frame: clears the modification stack and returns a renderer
    /// drawing into `backend`.
    pub fn frame<'a>(&'a mut self, backend: &'a mut dyn WidgetBackend) -> Renderer<'a> {
        self.mods.reset();
        Renderer::new(backend, self)
    }

    pub fn config(&self) -> &AutoGuiConfig {
        &self.config
    }

    pub fn histories(&self) -> &HistoryRegistry {
        &self.histories
    }

    pub fn autosaves(&self) -> &AutosaveRegistry {
        &self.autosaves
    }

    pub fn mods(&self) -> &ModStack {
        &self.mods
    }

    /// The LaTeX renderer, created from the config on first use.
    pub fn latex_mut(&mut self) -> &mut LatexRenderer {
        self.latex
            .get_or_insert_with(|| LatexRenderer::new(&self.config.latex))
    }

    /// Replace the LaTeX renderer, e.g. to use other executables.
    pub fn set_latex(&mut self, latex: LatexRenderer) {
        self.latex = Some(latex);
    }
}
