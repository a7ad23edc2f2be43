//! Interactive action input from stdin.
use async_trait::async_trait;
use fight_core::ActionId;
use fight_runtime::{ActionChooser, ChoiceRequest};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

/// Prompts on stdout and reads the choice from stdin.
///
/// Accepts either the 1-based index of an action or its id. Anything else
/// gives up the choice.
pub struct StdinChooser {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinChooser {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

#[async_trait]
impl ActionChooser for StdinChooser {
    async fn choose(&self, request: ChoiceRequest) -> Option<ActionId> {
        let menu = request
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| format!("{}) {action}", i + 1))
            .collect::<Vec<_>>()
            .join("  ");
        let prompt = format!("turn {} | breath {} | {menu}\n> ", request.turn, request.breath);

        let mut out = tokio::io::stdout();
        out.write_all(prompt.as_bytes()).await.ok()?;
        out.flush().await.ok()?;

        let line = self.lines.lock().await.next_line().await.ok()??;
        parse_choice(line.trim(), &request.actions)
    }
}

fn parse_choice(input: &str, actions: &[ActionId]) -> Option<ActionId> {
    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| actions.get(i)).cloned();
    }
    actions.iter().find(|action| action.as_str() == input).cloned()
}
