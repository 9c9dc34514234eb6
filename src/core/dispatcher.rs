use crate::core::chunker::{chunk, TELEGRAM_MESSAGE_LIMIT};
use crate::core::reading::{enneagram_text, life_path_text, pin_code_texts, Profile};
use crate::core::render::{
    escape_html, markdown_to_html, paraphrased_summary, render_summary, status_card, zodiac_traits,
};
use crate::core::session::SessionStore;
use crate::domain::model::{
    Action, Birthdate, Button, ContentKey, InboundEvent, OutboundMessage, Session, Shelf,
};
use crate::domain::ports::{ChatTransport, ContentStore, EventSource, Paraphraser};
use crate::utils::error::{KahinError, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::future::Future;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};

static BIRTHDATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("birthdate pattern compiles"));

const WAIT_NOTICE: &str = "Genel özet hazırlanıyor, lütfen bekleyiniz...";
const NO_SESSION_NOTICE: &str =
    "Lütfen önce doğum tarihinizi GG.AA.YYYY biçiminde gönderin (örneğin 31.07.2002).";
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Routes chat events to the numerology engine and content store.
pub struct Dispatcher<T, P, C> {
    transport: T,
    paraphraser: P,
    content: C,
    sessions: SessionStore,
    max_message_len: usize,
}

impl<T: ChatTransport, P: Paraphraser, C: ContentStore> Dispatcher<T, P, C> {
    pub fn new(transport: T, paraphraser: P, content: C) -> Self {
        Self {
            transport,
            paraphraser,
            content,
            sessions: SessionStore::new(),
            max_message_len: TELEGRAM_MESSAGE_LIMIT,
        }
    }

    pub fn with_max_message_len(mut self, max_message_len: usize) -> Self {
        self.max_message_len = max_message_len;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn handle(&self, event: InboundEvent) -> Result<()> {
        tracing::info!(sender = event.sender(), chat = event.chat(), "📨 {:?}", event);

        match event {
            InboundEvent::Text {
                sender,
                chat,
                message_id,
                text,
            } => self.handle_text(sender, chat, message_id, &text).await,
            InboundEvent::Action {
                sender,
                chat,
                callback_id,
                data,
            } => {
                if let Err(e) = self.transport.acknowledge(&callback_id).await {
                    tracing::warn!(sender, callback_id = %callback_id, "Callback acknowledgement failed: {}", e);
                }
                self.handle_action(sender, chat, &data).await
            }
        }
    }

    async fn handle_text(&self, sender: i64, chat: i64, message_id: i64, text: &str) -> Result<()> {
        if !BIRTHDATE_PATTERN.is_match(text) {
            tracing::debug!(sender, "Ignoring message without a birthdate");
            return Ok(());
        }

        let profile = match Birthdate::parse(text).and_then(Profile::derive) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(sender, "Rejected birthdate message: {}", e);
                let reply = format!("Girilen mesaj ({}) hatalı!", escape_html(text.trim()));
                return self.send(chat, reply, Some(message_id), Vec::new()).await;
            }
        };

        tracing::info!(
            sender,
            life_path = %profile.life_path,
            pin_code = %profile.pin_code,
            sign = %profile.zodiac.sign,
            "Derived profile"
        );

        let session = profile.into_session(message_id);
        self.sessions.insert(sender, session.clone()).await;
        self.send_status_card(chat, &session).await
    }

    async fn handle_action(&self, sender: i64, chat: i64, data: &str) -> Result<()> {
        let Some(action) = Action::from_id(data) else {
            tracing::warn!(sender, data, "Unknown callback action");
            return Ok(());
        };

        let Some(session) = self.sessions.get(sender).await else {
            tracing::info!(sender, action = action.id(), "Action without a session");
            return self.send(chat, NO_SESSION_NOTICE.to_string(), None, Vec::new()).await;
        };

        if let Err(e) = self.run_action(chat, &session, action).await {
            self.report_failure(chat, &session, action, &e).await?;
        }
        Ok(())
    }

    async fn run_action(&self, chat: i64, session: &Session, action: Action) -> Result<()> {
        let life_path_key = ContentKey::LifePath(session.life_path);

        match action {
            Action::FullTextMillman => {
                let text = life_path_text(&self.content, Shelf::MillmanFull, session.life_path)?;
                self.send_content(chat, session, &markdown_to_html(&text), true).await
            }
            Action::FullTextForbes => {
                let texts = pin_code_texts(&self.content, Shelf::ForbesFull, &session.pin_code)?;
                let joined = texts.join("\n\n");
                self.send_content(chat, session, &markdown_to_html(joined.trim()), true)
                    .await
            }
            Action::JsonShortMillman => {
                let document = self
                    .content
                    .lookup_summary(Shelf::MillmanShortJson, &life_path_key)?;
                let html = render_summary("GENEL KISA ÖZET", &document);
                self.send_content(chat, session, &html, true).await
            }
            Action::JsonLongMillman => {
                let document = self
                    .content
                    .lookup_summary(Shelf::MillmanLongJson, &life_path_key)?;
                let html = render_summary("GENEL UZUN ÖZET", &document);
                self.send_content(chat, session, &html, true).await
            }
            Action::SummaryMillman => {
                let text = life_path_text(&self.content, Shelf::MillmanSummary, session.life_path)?;
                self.send_paraphrased(chat, session, &text).await
            }
            Action::SummaryForbes => {
                let texts = pin_code_texts(&self.content, Shelf::ForbesSummary, &session.pin_code)?;
                let joined = texts.join("\n\n");
                self.send_paraphrased(chat, session, joined.trim()).await
            }
            Action::ZodiacTraits => {
                let content = enneagram_text(&self.content, &session.zodiac)?;
                let html = zodiac_traits(&session.zodiac, &content);
                self.send_content(chat, session, &html, true).await
            }
        }
    }

    async fn send_paraphrased(&self, chat: i64, session: &Session, text: &str) -> Result<()> {
        self.send_content(chat, session, WAIT_NOTICE, false).await?;
        let paraphrased = self.paraphraser.paraphrase(text).await?;
        self.send_content(chat, session, &paraphrased_summary(&paraphrased), true)
            .await
    }

    /// Expected failures are logged at warn, the rest at error with full
    /// detail. Either way the user gets a message and the status card.
    async fn report_failure(
        &self,
        chat: i64,
        session: &Session,
        action: Action,
        error: &KahinError,
    ) -> Result<()> {
        if error.is_user_recoverable() {
            tracing::warn!(action = action.id(), "Action failed: {}", error);
        } else {
            tracing::error!(
                action = action.id(),
                category = ?error.category(),
                severity = ?error.severity(),
                "❌ Action failed: {}",
                error
            );
            tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
        }
        self.send_content(chat, session, &error.user_friendly_message(), true)
            .await
    }

    async fn send_content(
        &self,
        chat: i64,
        session: &Session,
        html: &str,
        show_buttons: bool,
    ) -> Result<()> {
        for part in chunk(html, self.max_message_len) {
            self.send(chat, part, Some(session.message_id), Vec::new())
                .await?;
        }
        if show_buttons {
            self.send_status_card(chat, session).await?;
        }
        Ok(())
    }

    async fn send_status_card(&self, chat: i64, session: &Session) -> Result<()> {
        let buttons = Action::ALL.into_iter().map(Button::from).collect();
        self.send(chat, status_card(session), Some(session.message_id), buttons)
            .await
    }

    async fn send(
        &self,
        chat: i64,
        text: String,
        reply_to: Option<i64>,
        buttons: Vec<Button>,
    ) -> Result<()> {
        self.transport
            .send(&OutboundMessage {
                chat_id: chat,
                text,
                reply_to,
                buttons,
            })
            .await
    }
}

impl<T, P, C> Dispatcher<T, P, C>
where
    T: ChatTransport + 'static,
    P: Paraphraser + 'static,
    C: ContentStore + 'static,
{
    /// Polls `source` until ctrl-c.
    pub async fn run<S: EventSource>(self: &Arc<Self>, source: &S) -> Result<()> {
        self.run_until(source, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl-c: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Polls `source` until `shutdown` resolves. Each sender's events run as
    /// one task, in arrival order; different senders run concurrently. A
    /// failing event is logged and skipped; a failing poll is retried after a
    /// short pause. Tasks still in flight at shutdown are aborted.
    pub async fn run_until<S, F>(self: &Arc<Self>, source: &S, shutdown: F) -> Result<()>
    where
        S: EventSource,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut tasks = JoinSet::new();
        tracing::info!("🚀 Bot is polling for updates");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                batch = source.next_events() => match batch {
                    Ok(events) => self.spawn_batch(&mut tasks, events),
                    Err(e) => {
                        tracing::error!("❌ Polling failed: {}", e);
                        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
                        tokio::select! {
                            _ = &mut shutdown => break,
                            _ = tokio::time::sleep(POLL_RETRY_DELAY) => {}
                        }
                    }
                }
            }

            while let Some(joined) = tasks.try_join_next() {
                log_join_failure(joined);
            }
        }

        tracing::info!(in_flight = tasks.len(), "Shutdown requested, stopping the poll loop");
        tasks.shutdown().await;
        Ok(())
    }

    fn spawn_batch(self: &Arc<Self>, tasks: &mut JoinSet<()>, events: Vec<InboundEvent>) {
        let mut by_sender: IndexMap<i64, Vec<InboundEvent>> = IndexMap::new();
        for event in events {
            by_sender.entry(event.sender()).or_default().push(event);
        }

        for (sender, events) in by_sender {
            let dispatcher = Arc::clone(self);
            tasks.spawn(async move {
                for event in events {
                    if let Err(e) = dispatcher.handle(event).await {
                        tracing::error!(
                            sender,
                            category = ?e.category(),
                            "❌ Failed to handle event: {}",
                            e
                        );
                    }
                }
            });
        }
    }
}

fn log_join_failure(joined: std::result::Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            tracing::error!("❌ Event handler panicked: {}", e);
        }
    }
}
