//! Main event loop - consumes transport events until disconnect or signal

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::auth_service::AuthService;
use super::shutdown::ShutdownCoordinator;
use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::{Action, AdminSet, Event, IncomingMessage, ScoreboardState};
use crate::domain::traits::{Connection, ScoreStore};

/// Exit status when the remote side closed the connection
pub const EXIT_DISCONNECTED: i32 = 1;
/// Exit status after a termination signal
pub const EXIT_SIGNALLED: i32 = 130;

/// Startup parameters taken from the configuration
#[derive(Debug, Clone, Default)]
pub struct RuntimeSettings {
    pub nick: String,
    pub password: Option<String>,
    /// Normalised channel names to join on connect
    pub channels: Vec<String>,
    /// Space separated admin nicks
    pub admins: String,
}

/// How the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Disconnected,
    Signalled,
}

impl RunOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Disconnected => EXIT_DISCONNECTED,
            RunOutcome::Signalled => EXIT_SIGNALLED,
        }
    }
}

/// Owns the mutable bot state; only the loop task touches it
pub struct BotRuntime<C: Connection> {
    conn: C,
    settings: RuntimeSettings,
    dispatcher: MessageDispatcher,
    auth: AuthService,
    admins: AdminSet,
    scoreboard: ScoreboardState,
    store: Option<Box<dyn ScoreStore>>,
    joined: Vec<String>,
    shutdown: ShutdownCoordinator,
    rng: StdRng,
}

impl<C: Connection> BotRuntime<C> {
    /// Load the scoreboard and seed the admin set.
    ///
    /// A malformed scoreboard is fatal.
    pub fn new(
        conn: C,
        settings: RuntimeSettings,
        dispatcher: MessageDispatcher,
        store: Option<Box<dyn ScoreStore>>,
    ) -> Result<Self, BotError> {
        let scoreboard = match &store {
            Some(store) => store.load()?,
            None => ScoreboardState::new(),
        };
        tracing::info!("Scoreboard loaded ({} subjects)", scoreboard.len());

        Ok(Self {
            conn,
            auth: AuthService::new(settings.nick.clone()),
            admins: AdminSet::from_list(&settings.admins),
            settings,
            dispatcher,
            scoreboard,
            store,
            joined: Vec::new(),
            shutdown: ShutdownCoordinator::default(),
            rng: StdRng::from_os_rng(),
        })
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn admins(&self) -> &AdminSet {
        &self.admins
    }

    pub fn scoreboard(&self) -> &ScoreboardState {
        &self.scoreboard
    }

    pub fn joined(&self) -> &[String] {
        &self.joined
    }

    /// Process events until the transport goes away or `cancel` fires
    pub async fn run(
        &mut self,
        mut events: mpsc::Receiver<Event>,
        cancel: CancellationToken,
    ) -> Result<RunOutcome, BotError> {
        tracing::info!("Starting event loop as {}", self.settings.nick);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return self.shut_down().await,
                event = events.recv() => match event {
                    None | Some(Event::Disconnected) => {
                        tracing::warn!("Disconnected by remote");
                        self.persist()?;
                        return Ok(RunOutcome::Disconnected);
                    }
                    Some(event) => {
                        // a stuck transport call must not hold off shutdown
                        let handled = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => None,
                            result = self.handle_event(event) => Some(result),
                        };
                        match handled {
                            None => return self.shut_down().await,
                            Some(Err(e)) => {
                                tracing::error!("Transport error: {}", e);
                                if let Err(save_err) = self.persist() {
                                    tracing::error!("Failed to save scoreboard: {}", save_err);
                                }
                                return Err(e);
                            }
                            Some(Ok(())) => {}
                        }
                    }
                },
            }
        }
    }

    async fn shut_down(&mut self) -> Result<RunOutcome, BotError> {
        tracing::info!("Termination requested");
        let channels = self.joined.clone();
        self.shutdown
            .execute(&self.conn, &channels, self.store.as_deref(), &self.scoreboard)
            .await?;
        Ok(RunOutcome::Signalled)
    }

    pub async fn handle_event(&mut self, event: Event) -> Result<(), BotError> {
        match event {
            Event::Connected => self.on_connected().await,
            Event::IdentityVerified { queried, responder } => {
                match self.auth.identity_verified(&mut self.admins, &queried, &responder) {
                    Some(ack) => self.perform(ack).await,
                    None => Ok(()),
                }
            }
            Event::Message(message) => self.on_message(message).await,
            Event::Disconnected => Ok(()),
        }
    }

    async fn on_connected(&mut self) -> Result<(), BotError> {
        tracing::info!("Connected as {}", self.settings.nick);
        if let Some(password) = self.settings.password.clone().filter(|p| !p.is_empty()) {
            self.conn.send_message("NickServ", &format!("IDENTIFY {}", password)).await?;
        }
        for channel in self.settings.channels.clone() {
            self.perform(Action::join(channel)).await?;
        }
        self.admins.extend_from_list(&self.settings.admins);
        tracing::info!("Trusting {} nick(s)", self.admins.len());
        Ok(())
    }

    async fn on_message(&mut self, message: IncomingMessage) -> Result<(), BotError> {
        let actions = self
            .dispatcher
            .dispatch(&message, &self.admins, &mut self.scoreboard, &mut self.rng);
        for action in actions {
            self.perform(action).await?;
        }
        Ok(())
    }

    async fn perform(&mut self, action: Action) -> Result<(), BotError> {
        match action {
            Action::Say { target, text } => self.conn.send_message(&target, &text).await,
            Action::Join { channel } => {
                self.conn.join(&channel).await?;
                if !self.joined.contains(&channel) {
                    self.joined.push(channel);
                }
                Ok(())
            }
            Action::Part { channel, reason } => {
                self.conn.part(&channel, &reason).await?;
                self.joined.retain(|c| c != &channel);
                Ok(())
            }
        }
    }

    fn persist(&self) -> Result<(), BotError> {
        if let Some(store) = &self.store {
            store.save(&self.scoreboard)?;
            tracing::info!("Saved scoreboard ({} subjects)", self.scoreboard.len());
        }
        Ok(())
    }
}
