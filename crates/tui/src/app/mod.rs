use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::oneshot;

use gateway::{
    ChatEvent, ChatRole, ChatStream, ChatTurn, Gateway, GatewayConfig, GatewayError,
    GeneratedImage, SizeTier,
};
use ledger::{Ledger, Screen, Session, TransactionKind};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    forms::{AddForm, GoalForm},
    ui::{self, keymap::AppAction},
};

const TOAST_LIFETIME: Duration = Duration::from_millis(2500);
const GREETING: &str = "Hello! Ask me anything about your income, expenses or savings goal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Transactions,
    Chat,
    Image,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Transactions => "Transactions",
            Self::Chat => "Chat",
            Self::Image => "Image",
        }
    }
}

#[derive(Debug)]
pub struct LoginState {
    pub name: String,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum TransactionsMode {
    List,
    Add(AddForm),
    Goal(GoalForm),
}

#[derive(Debug)]
pub struct TransactionsState {
    pub selected: usize,
    pub mode: TransactionsMode,
}

impl Default for TransactionsState {
    fn default() -> Self {
        Self {
            selected: 0,
            mode: TransactionsMode::List,
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub turns: Vec<ChatTurn>,
    pub input: String,
    pub busy: bool,
}

#[derive(Debug)]
pub struct ImageState {
    pub prompt: String,
    pub size: SizeTier,
    pub busy: bool,
    pub status: Option<String>,
}

impl Default for ImageState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            size: SizeTier::OneK,
            busy: false,
            status: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    shown_at: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    pub session: Session,
    pub login: LoginState,
    pub section: Section,
    pub transactions: TransactionsState,
    pub chat: ChatState,
    pub image: ImageState,
    pub toast: Option<ToastState>,
}

type ImageOutcome = std::result::Result<Option<GeneratedImage>, GatewayError>;

pub struct App {
    config: AppConfig,
    gateway: Gateway,
    pub state: AppState,
    chat_stream: Option<ChatStream>,
    image_rx: Option<oneshot::Receiver<ImageOutcome>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let gateway = Gateway::new(GatewayConfig {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            chat_model: config.chat_model.clone(),
            image_model: config.image_model.clone(),
        });

        let mut chat = ChatState::default();
        chat.turns.push(ChatTurn {
            role: ChatRole::Model,
            text: GREETING.to_string(),
        });

        let state = AppState {
            ledger: Ledger::new(),
            session: Session::new(),
            login: LoginState {
                name: config.username.clone(),
                message: None,
            },
            section: Section::Dashboard,
            transactions: TransactionsState::default(),
            chat,
            image: ImageState::default(),
            toast: None,
        };

        Self {
            config,
            gateway,
            state,
            chat_stream: None,
            image_rx: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.pump();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Drains pending gateway events and expires the toast. Runs once per
    /// event-loop tick so streamed fragments appear without user input.
    fn pump(&mut self) {
        if let Some(mut stream) = self.chat_stream.take() {
            let mut open = true;
            while let Some(event) = stream.try_next() {
                match event {
                    ChatEvent::Fragment(text) => {
                        if let Some(turn) = self.state.chat.turns.last_mut() {
                            turn.text.push_str(&text);
                        }
                    }
                    ChatEvent::Done => {
                        self.state.chat.busy = false;
                        open = false;
                        break;
                    }
                    ChatEvent::Failed(err) => {
                        if let Some(turn) = self.state.chat.turns.last_mut() {
                            turn.text = gateway_message(&err);
                        }
                        self.state.chat.busy = false;
                        open = false;
                        break;
                    }
                }
            }
            if open {
                self.chat_stream = Some(stream);
            }
        }

        if let Some(mut rx) = self.image_rx.take() {
            match rx.try_recv() {
                Ok(outcome) => {
                    self.state.image.busy = false;
                    self.finish_image(outcome);
                }
                Err(oneshot::error::TryRecvError::Empty) => self.image_rx = Some(rx),
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.state.image.busy = false;
                    self.state.image.status = Some("Image generation was interrupted.".to_string());
                }
            }
        }

        if let Some(toast) = &self.state.toast
            && toast.shown_at.elapsed() > TOAST_LIFETIME
        {
            self.state.toast = None;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.session.active_screen() {
            Screen::Login => self.handle_login_key(action),
            Screen::Dashboard => self.handle_home_key(action),
        }
    }

    fn handle_login_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.login.name.push(ch),
            AppAction::Backspace => {
                self.state.login.name.pop();
            }
            AppAction::Submit => match self.state.session.login(&self.state.login.name) {
                Ok(()) => {
                    self.state.login.message = None;
                    self.state.section = Section::Dashboard;
                }
                Err(err) => self.state.login.message = Some(err.to_string()),
            },
            _ => {}
        }
    }

    fn handle_home_key(&mut self, action: AppAction) {
        if matches!(
            self.state.transactions.mode,
            TransactionsMode::Add(_) | TransactionsMode::Goal(_)
        ) {
            self.handle_form_key(action);
            return;
        }

        match self.state.section {
            Section::Chat => self.handle_chat_key(action),
            Section::Image => self.handle_image_key(action),
            Section::Dashboard | Section::Transactions => self.handle_browse_key(action),
        }
    }

    fn handle_form_key(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel => self.state.transactions.mode = TransactionsMode::List,
            AppAction::NextField => {
                if let TransactionsMode::Add(form) = &mut self.state.transactions.mode {
                    form.advance_focus();
                }
            }
            AppAction::Left | AppAction::Right => {
                if let TransactionsMode::Add(form) = &mut self.state.transactions.mode {
                    form.cycle_category(action == AppAction::Right);
                }
            }
            AppAction::Backspace => match &mut self.state.transactions.mode {
                TransactionsMode::Add(form) => form.pop_char(),
                TransactionsMode::Goal(form) => {
                    form.amount.pop();
                }
                TransactionsMode::List => {}
            },
            AppAction::Input(ch) => match &mut self.state.transactions.mode {
                TransactionsMode::Add(form) => form.push_char(ch),
                TransactionsMode::Goal(form) => form.amount.push(ch),
                TransactionsMode::List => {}
            },
            AppAction::Submit => match &self.state.transactions.mode {
                TransactionsMode::Add(_) => self.submit_add(),
                TransactionsMode::Goal(_) => self.submit_goal(),
                TransactionsMode::List => {}
            },
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.chat.input.push(ch),
            AppAction::Backspace => {
                self.state.chat.input.pop();
            }
            AppAction::Submit => self.send_chat(),
            AppAction::Cancel => self.state.section = Section::Dashboard,
            _ => {}
        }
    }

    fn handle_image_key(&mut self, action: AppAction) {
        match action {
            AppAction::Input(ch) => self.state.image.prompt.push(ch),
            AppAction::Backspace => {
                self.state.image.prompt.pop();
            }
            AppAction::NextField => self.state.image.size = self.state.image.size.cycle(),
            AppAction::Submit => self.start_image(),
            AppAction::Cancel => self.state.section = Section::Dashboard,
            _ => {}
        }
    }

    /// Dashboard and transaction-list keys. Plain characters navigate here;
    /// text entry only happens inside forms and the chat/image sections.
    fn handle_browse_key(&mut self, action: AppAction) {
        match action {
            AppAction::Up => self.select_prev(),
            AppAction::Down => self.select_next(),
            AppAction::Input(ch) => match ch {
                'q' => self.should_quit = true,
                'h' | 'H' => self.state.section = Section::Dashboard,
                't' | 'T' => self.state.section = Section::Transactions,
                'c' | 'C' => self.state.section = Section::Chat,
                'm' | 'M' => self.state.section = Section::Image,
                'L' => self.logout(),
                'j' | 'J' => self.select_next(),
                'k' | 'K' => self.select_prev(),
                'a' | 'A' => self.open_add(TransactionKind::Expense),
                'i' | 'I' => self.open_add(TransactionKind::Income),
                'g' | 'G' => self.open_goal(),
                'd' | 'D' => self.delete_selected(),
                _ => {}
            },
            _ => {}
        }
    }

    fn select_next(&mut self) {
        if self.state.section != Section::Transactions {
            return;
        }
        let len = self.state.ledger.transactions().len();
        if len > 0 {
            self.state.transactions.selected = (self.state.transactions.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        if self.state.section == Section::Transactions {
            self.state.transactions.selected = self.state.transactions.selected.saturating_sub(1);
        }
    }

    fn open_add(&mut self, kind: TransactionKind) {
        if self.state.section == Section::Transactions {
            self.state.transactions.mode = TransactionsMode::Add(AddForm::new(kind));
        }
    }

    fn open_goal(&mut self) {
        if self.state.section == Section::Transactions || self.state.section == Section::Dashboard {
            self.state.transactions.mode = TransactionsMode::Goal(GoalForm::default());
            self.state.section = Section::Transactions;
        }
    }

    fn delete_selected(&mut self) {
        if self.state.section != Section::Transactions {
            return;
        }
        let selected = self.state.transactions.selected;
        let Some(tx) = self.state.ledger.transactions().get(selected) else {
            return;
        };
        let id = tx.id;
        self.state.ledger.delete_transaction(id);
        let len = self.state.ledger.transactions().len();
        if len > 0 {
            self.state.transactions.selected = selected.min(len - 1);
        } else {
            self.state.transactions.selected = 0;
        }
        self.toast("Entry deleted", ToastLevel::Info);
    }

    fn submit_add(&mut self) {
        let TransactionsMode::Add(form) = &mut self.state.transactions.mode else {
            return;
        };
        match form.parsed() {
            Err(message) => form.message = Some(message),
            Ok((description, amount)) => {
                let kind = form.kind;
                let category = form.category().id;
                match self
                    .state
                    .ledger
                    .add_transaction(&description, amount, kind, category)
                {
                    Ok(_) => {
                        self.state.transactions.mode = TransactionsMode::List;
                        self.state.transactions.selected = 0;
                        self.toast("Entry added", ToastLevel::Success);
                    }
                    Err(err) => form.message = Some(err.to_string()),
                }
            }
        }
    }

    fn submit_goal(&mut self) {
        let TransactionsMode::Goal(form) = &mut self.state.transactions.mode else {
            return;
        };
        match form.parsed() {
            Err(message) => form.message = Some(message),
            Ok(target) => match self.state.ledger.set_savings_goal(target) {
                Ok(()) => {
                    self.state.transactions.mode = TransactionsMode::List;
                    self.toast("Savings goal updated", ToastLevel::Success);
                }
                Err(err) => form.message = Some(err.to_string()),
            },
        }
    }

    fn logout(&mut self) {
        self.state.session.logout();
        self.state.login.name = self.state.session.display_name().to_string();
        self.state.login.message = None;
    }

    fn send_chat(&mut self) {
        if self.state.chat.busy {
            return;
        }
        let message = self.state.chat.input.trim().to_string();
        if message.is_empty() {
            return;
        }
        self.state.chat.input.clear();

        let history = self.state.chat.turns.clone();
        self.state.chat.turns.push(ChatTurn {
            role: ChatRole::User,
            text: message.clone(),
        });
        self.state.chat.turns.push(ChatTurn {
            role: ChatRole::Model,
            text: String::new(),
        });
        self.state.chat.busy = true;

        let snapshot = self.state.ledger.snapshot();
        self.chat_stream = Some(self.gateway.stream_chat(&message, &history, &snapshot));
    }

    fn start_image(&mut self) {
        if self.state.image.busy {
            return;
        }
        let prompt = self.state.image.prompt.trim().to_string();
        if prompt.is_empty() {
            return;
        }
        self.state.image.busy = true;
        self.state.image.status = Some("Generating...".to_string());

        let gateway = self.gateway.clone();
        let size = self.state.image.size;
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(gateway.generate_image(&prompt, size).await);
        });
        self.image_rx = Some(rx);
    }

    fn finish_image(&mut self, outcome: ImageOutcome) {
        match outcome {
            Ok(Some(image)) => match self.save_image(&image) {
                Ok(path) => {
                    tracing::info!(path = %path, "image saved");
                    self.state.image.status = Some(format!("Saved {path}"));
                    self.toast("Image saved", ToastLevel::Success);
                }
                Err(err) => {
                    self.state.image.status = Some(format!("Could not save image: {err}"));
                }
            },
            Ok(None) => {
                self.state.image.status =
                    Some("No image produced. Try another prompt.".to_string());
            }
            Err(err) => {
                self.state.image.status = Some(gateway_message(&err));
            }
        }
    }

    fn save_image(&self, image: &GeneratedImage) -> std::io::Result<String> {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
        let path = std::path::Path::new(&self.config.output_dir)
            .join(format!("goal-{timestamp}.png"));
        std::fs::create_dir_all(&self.config.output_dir)?;
        std::fs::write(&path, &image.bytes)?;
        Ok(path.display().to_string())
    }

    fn toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }
}

fn gateway_message(err: &GatewayError) -> String {
    if err.is_credential_rejection() {
        return "API key rejected. Update api_key in your configuration.".to_string();
    }
    match err {
        GatewayError::Unauthorized => {
            "API key rejected. Update api_key in your configuration.".to_string()
        }
        GatewayError::ModelNotFound(message) => format!("Model not found: {message}"),
        GatewayError::Quota => "Quota exhausted. Try again later.".to_string(),
        GatewayError::Api { status, message } => format!("Service error ({status}): {message}"),
        GatewayError::Transport(err) => format!("Service unreachable: {err}"),
        GatewayError::Decode(message) => format!("Malformed response: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(AppConfig::default())
    }

    #[test]
    fn login_flow_switches_screens() {
        let mut app = test_app();
        app.handle_login_key(AppAction::Submit);
        assert_eq!(app.state.session.active_screen(), Screen::Login);
        assert!(app.state.login.message.is_some());

        for ch in "Alice".chars() {
            app.handle_login_key(AppAction::Input(ch));
        }
        app.handle_login_key(AppAction::Submit);
        assert_eq!(app.state.session.active_screen(), Screen::Dashboard);
        assert!(app.state.login.message.is_none());
    }

    #[test]
    fn add_form_submits_into_ledger() {
        let mut app = test_app();
        app.state.session.login("Alice").unwrap();
        app.state.section = Section::Transactions;

        app.handle_browse_key(AppAction::Input('a'));
        for ch in "250".chars() {
            app.handle_form_key(AppAction::Input(ch));
        }
        app.handle_form_key(AppAction::NextField);
        for ch in "lunch".chars() {
            app.handle_form_key(AppAction::Input(ch));
        }
        app.handle_form_key(AppAction::Submit);

        assert!(matches!(app.state.transactions.mode, TransactionsMode::List));
        assert_eq!(app.state.ledger.transactions().len(), 1);
        assert_eq!(app.state.ledger.transactions()[0].description, "lunch");
    }

    #[test]
    fn add_form_keeps_fields_on_validation_error() {
        let mut app = test_app();
        app.state.session.login("Alice").unwrap();
        app.state.section = Section::Transactions;

        app.handle_browse_key(AppAction::Input('a'));
        for ch in "250".chars() {
            app.handle_form_key(AppAction::Input(ch));
        }
        // No description: submit must fail in place.
        app.handle_form_key(AppAction::Submit);

        let TransactionsMode::Add(form) = &app.state.transactions.mode else {
            panic!("form closed on error");
        };
        assert_eq!(form.amount, "250");
        assert!(form.message.is_some());
        assert!(app.state.ledger.transactions().is_empty());
    }

    #[test]
    fn delete_clamps_selection() {
        let mut app = test_app();
        app.state.session.login("Alice").unwrap();
        app.state.section = Section::Transactions;
        app.state
            .ledger
            .add_transaction("one", ledger::MoneyCents::new(100), TransactionKind::Expense, "food")
            .unwrap();
        app.state
            .ledger
            .add_transaction("two", ledger::MoneyCents::new(200), TransactionKind::Expense, "food")
            .unwrap();

        app.state.transactions.selected = 1;
        app.handle_browse_key(AppAction::Input('d'));
        assert_eq!(app.state.ledger.transactions().len(), 1);
        assert_eq!(app.state.transactions.selected, 0);
    }

    #[test]
    fn logout_keeps_ledger_and_prefills_name() {
        let mut app = test_app();
        app.state.session.login("Alice").unwrap();
        app.state
            .ledger
            .add_transaction("salary", ledger::MoneyCents::new(1000), TransactionKind::Income, "salary")
            .unwrap();

        app.state.section = Section::Dashboard;
        app.handle_browse_key(AppAction::Input('L'));
        assert_eq!(app.state.session.active_screen(), Screen::Login);
        assert_eq!(app.state.login.name, "Alice");
        assert_eq!(app.state.ledger.transactions().len(), 1);
    }

    #[test]
    fn chat_send_requires_input_and_not_busy() {
        let mut app = test_app();
        app.state.chat.input = "   ".to_string();
        app.send_chat();
        assert!(!app.state.chat.busy);
        assert_eq!(app.state.chat.turns.len(), 1);
    }

    #[test]
    fn goal_form_rejects_negative_target() {
        let mut app = test_app();
        app.state.session.login("Alice").unwrap();
        app.state.section = Section::Transactions;

        app.handle_browse_key(AppAction::Input('g'));
        for ch in "-100".chars() {
            app.handle_form_key(AppAction::Input(ch));
        }
        app.handle_form_key(AppAction::Submit);

        let TransactionsMode::Goal(form) = &app.state.transactions.mode else {
            panic!("form closed on error");
        };
        assert!(form.message.is_some());
        assert!(!app.state.ledger.goal().is_set());
    }
}
