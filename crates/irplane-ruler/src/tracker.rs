//! Per-channel tracker table
//!
//! Every IR channel the tracking device reports gets one slot holding the
//! token it currently controls and that token's ruler. The table is owned by
//! a single coordinator and passed by reference; there is no global registry.
//!
//! Bases identify themselves by ID. [`TrackerTable::grab_base`] maps the ID to
//! a token through the configured [`BaseSetup`] list and the host's
//! [`TokenDirectory`].

use crate::host::RulerHost;
use crate::DragRuler;
use irplane_core::{Error, Point, Result, Token, TokenDirectory};
use irplane_settings::{BaseSetup, Config, RulerSettings};
use parking_lot::RwLock;
use std::sync::Arc;

/// Number of channels the tracking device reports
pub const DEFAULT_CHANNELS: usize = 16;

/// State of one IR channel
#[derive(Debug)]
pub struct ChannelTracker {
    token: Option<Arc<dyn Token>>,
    base_id: Option<u32>,
    ruler: DragRuler,
}

impl ChannelTracker {
    /// Base last seen on this channel
    pub fn base_id(&self) -> Option<u32> {
        self.base_id
    }

    /// Token controlled through this channel
    pub fn token(&self) -> Option<&Arc<dyn Token>> {
        self.token.as_ref()
    }

    /// Ruler of this channel
    pub fn ruler(&self) -> &DragRuler {
        &self.ruler
    }

    /// Mutable ruler of this channel
    pub fn ruler_mut(&mut self) -> &mut DragRuler {
        &mut self.ruler
    }
}

/// Fixed-size table of channel trackers sharing one settings handle.
#[derive(Debug)]
pub struct TrackerTable {
    channels: Vec<ChannelTracker>,
    settings: Arc<RwLock<RulerSettings>>,
    bases: Vec<BaseSetup>,
}

/// Token assigned to `base_id`, if its setup resolves on the current scene.
///
/// Linked bases resolve by actor name on any scene. Unlinked bases resolve by
/// token name, and only on the scene they were configured for.
pub fn resolve_base(
    bases: &[BaseSetup],
    base_id: u32,
    directory: &dyn TokenDirectory,
) -> Option<Arc<dyn Token>> {
    let base = bases.iter().find(|base| base.base_id == base_id)?;
    if base.link_actor {
        directory.token_by_actor(&base.actor_name)
    } else if base.scene_name == directory.scene_name() {
        directory.token_by_name(&base.token_name)
    } else {
        None
    }
}

impl TrackerTable {
    /// Create a table with `channels` slots
    pub fn new(host: RulerHost, settings: Arc<RwLock<RulerSettings>>, channels: usize) -> Self {
        let channels = (0..channels)
            .map(|_| ChannelTracker {
                token: None,
                base_id: None,
                ruler: DragRuler::new(host.clone(), settings.clone()),
            })
            .collect();
        Self {
            channels,
            settings,
            bases: Vec::new(),
        }
    }

    /// Use `bases` to route base IDs to tokens
    pub fn with_bases(mut self, bases: Vec<BaseSetup>) -> Self {
        self.bases = bases;
        self
    }

    /// Create a table sized and scoped by `config`
    pub fn from_config(mut host: RulerHost, config: &Config) -> Self {
        host.user_id = config.tracker.active_user.clone();
        let settings = Arc::new(RwLock::new(config.ruler.clone()));
        Self::new(host, settings, config.tracker.channels).with_bases(config.tracker.bases.clone())
    }

    /// Settings shared by every ruler in the table
    pub fn settings(&self) -> &Arc<RwLock<RulerSettings>> {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Tracker for a channel
    pub fn channel(&self, channel: usize) -> Option<&ChannelTracker> {
        self.channels.get(channel)
    }

    /// Mutable tracker for a channel
    pub fn channel_mut(&mut self, channel: usize) -> Option<&mut ChannelTracker> {
        self.channels.get_mut(channel)
    }

    fn slot(&mut self, channel: usize) -> Result<&mut ChannelTracker> {
        let channels = self.channels.len();
        self.channels
            .get_mut(channel)
            .ok_or(Error::ChannelOutOfRange { channel, channels })
    }

    /// Take control of `token` on `channel` and start its ruler at `position`
    pub async fn grab(
        &mut self,
        channel: usize,
        token: Arc<dyn Token>,
        position: Point,
    ) -> Result<()> {
        let slot = self.slot(channel)?;
        tracing::debug!("channel {} grabbed {}", channel, token.id());
        slot.token = Some(token.clone());
        slot.base_id = None;
        slot.ruler.start(token, position).await
    }

    /// Take control of the token assigned to `base_id` on `channel`.
    ///
    /// A base already holding its token on this channel keeps its ruler.
    /// Returns whether the channel now controls a token for the base; an
    /// unknown base leaves the channel untouched.
    pub async fn grab_base(
        &mut self,
        channel: usize,
        base_id: u32,
        directory: &dyn TokenDirectory,
        position: Point,
    ) -> Result<bool> {
        let slot = self.slot(channel)?;
        if slot.base_id == Some(base_id) && slot.token.is_some() {
            return Ok(true);
        }

        let Some(token) = resolve_base(&self.bases, base_id, directory) else {
            tracing::debug!("No configured token for base ID {}", base_id);
            return Ok(false);
        };
        tracing::debug!("Grabbed token {} with base ID {}", token.id(), base_id);
        self.grab(channel, token, position).await?;
        self.slot(channel)?.base_id = Some(base_id);
        Ok(true)
    }

    /// Feed a tracked position to the channel's ruler
    pub async fn track(&mut self, channel: usize, position: Point) -> Result<()> {
        self.slot(channel)?.ruler.move_to(position).await
    }

    /// Release the channel's token; ends the ruler when the stop trigger is a
    /// token drop. Returns the released token.
    pub fn release(&mut self, channel: usize) -> Result<Option<Arc<dyn Token>>> {
        let slot = self.slot(channel)?;
        slot.ruler.token_drop();
        slot.base_id = None;
        let token = slot.token.take();
        if let Some(token) = &token {
            tracing::debug!("channel {} released {}", channel, token.id());
        }
        Ok(token)
    }

    /// Draw a ruler for `token` from its position to (`x`, `y`) without
    /// tracker input
    pub async fn ruler_test(
        &mut self,
        channel: usize,
        token: Arc<dyn Token>,
        x: f64,
        y: f64,
    ) -> Result<()> {
        let origin = token.position();
        self.grab(channel, token, origin).await?;
        self.track(channel, Point::new(x, y)).await
    }

    /// End the ruler started by [`ruler_test`](Self::ruler_test)
    pub fn ruler_test_end(&mut self, channel: usize) -> Result<()> {
        self.slot(channel)?.ruler.end();
        Ok(())
    }
}
