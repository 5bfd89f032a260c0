//! Invitation answer delivery

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use invite_flow::{
    ChipSelection, Invitation, LETTER_SLIDE_DELAY, PlacePreset, TimeEntry, parse_iso, parse_time,
};
use telegram_notify::{BotConfig, DEFAULT_API_BASE, TelegramClient};

#[derive(Args)]
pub struct SendArgs {
    /// Place typed by hand
    #[arg(long, conflicts_with = "preset", required_unless_present = "preset")]
    pub place: Option<String>,

    /// One of the suggested places
    #[arg(long)]
    pub preset: Option<PlaceArg>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Time (HH:MM, 24-hour)
    #[arg(long)]
    pub time: String,

    /// Print the message instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the validated answer as JSON
    #[arg(long)]
    pub json: bool,

    /// Bot token
    #[arg(long, env = "INVITE_BOT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Destination chat id
    #[arg(long, env = "INVITE_CHAT_ID")]
    pub chat_id: Option<String>,

    /// Bot API base URL
    #[arg(long, env = "INVITE_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlaceArg {
    Park,
    Cinema,
    CoffeeShop,
    Embankment,
}

impl From<PlaceArg> for PlacePreset {
    fn from(place: PlaceArg) -> Self {
        match place {
            PlaceArg::Park => Self::Park,
            PlaceArg::Cinema => Self::Cinema,
            PlaceArg::CoffeeShop => Self::CoffeeShop,
            PlaceArg::Embankment => Self::Embankment,
        }
    }
}

/// Walk the invitation from the closed envelope to an open form and fill it in
pub fn fill_invitation(args: &SendArgs) -> Result<Invitation> {
    // Reject malformed literals up front with a precise message
    let date = parse_iso(&args.date)?;
    parse_time(&args.time)?;

    let mut invitation = Invitation::new();
    invitation.open(Duration::ZERO)?;
    invitation.tick(LETTER_SLIDE_DELAY);
    invitation.open_form()?;

    let form = invitation.form_mut()?;
    match (&args.place, args.preset) {
        (Some(place), _) => match PlacePreset::find(place) {
            Some(preset) => form.place.choose(ChipSelection::Preset(preset)),
            None => {
                form.place.choose(ChipSelection::Other);
                form.place.type_text(place.as_str());
            }
        },
        (None, Some(preset)) => form.place.choose(ChipSelection::Preset(preset.into())),
        (None, None) => {}
    }
    form.date = Some(date);
    form.time = TimeEntry::from_value(&args.time);

    Ok(invitation)
}

pub async fn execute(args: SendArgs) -> Result<()> {
    let mut invitation = fill_invitation(&args)?;
    let answer = invitation.submit()?;
    let message = answer.to_message();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    }
    if args.dry_run {
        println!("{message}");
        return Ok(());
    }

    let (Some(token), Some(chat_id)) = (args.token.as_deref(), args.chat_id.as_deref()) else {
        bail!("bot token and chat id are required (use --token/--chat-id or INVITE_BOT_TOKEN/INVITE_CHAT_ID)");
    };
    let config = BotConfig::new(token, chat_id)
        .with_api_base(args.api_base.as_str())
        .with_timeout(Duration::from_secs(args.timeout));
    let client = TelegramClient::new(config)?;

    match client.send_message(&message).await {
        Ok(sent) => {
            invitation.delivered()?;
            log::info!("Invitation {}", invitation.state());
            println!("Sent (message #{})", sent.message_id);
            Ok(())
        }
        Err(err) => {
            let transient = err.is_transient();
            invitation.delivery_failed(err.to_string())?;
            let hint = if transient { "; try again later" } else { "" };
            Err(err).with_context(|| format!("Failed to deliver the answer{hint}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use invite_flow::{FlowError, InvitationState};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: SendArgs,
    }

    fn parse(extra: &[&str]) -> SendArgs {
        let mut argv = vec!["send"];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_fill_with_preset() {
        let args = parse(&["--preset", "coffee-shop", "--date", "2026-02-14", "--time", "18:05"]);
        let mut invitation = fill_invitation(&args).unwrap();
        assert_eq!(invitation.state(), &InvitationState::FormOpen);

        let answer = invitation.submit().unwrap();
        assert_eq!(answer.place, "Кофейня");
        assert!(answer.to_message().contains("18:05"));
    }

    #[test]
    fn test_fill_with_free_text() {
        let args = parse(&["--place", "Каток", "--date", "2026-01-03", "--time", "12:00"]);
        let answer = fill_invitation(&args).unwrap().submit().unwrap();
        assert_eq!(answer.place, "Каток");
    }

    #[test]
    fn test_typed_preset_name_selects_chip() {
        let args = parse(&["--place", "cinema", "--date", "2026-01-03", "--time", "12:00"]);
        let mut invitation = fill_invitation(&args).unwrap();
        assert_eq!(invitation.form().place.chip(), ChipSelection::Preset(PlacePreset::Cinema));

        assert_eq!(invitation.submit().unwrap().place, "Кино");
    }

    #[test]
    fn test_bad_time_is_reported() {
        let args = parse(&["--place", "Каток", "--date", "2026-01-03", "--time", "25:00"]);
        let err = fill_invitation(&args).unwrap_err();
        assert_eq!(
            err.downcast_ref::<FlowError>(),
            Some(&FlowError::InvalidTime("25:00".to_string()))
        );
    }

    #[test]
    fn test_place_and_preset_conflict() {
        let argv = [
            "send", "--place", "x", "--preset", "park", "--date", "2026-01-03", "--time", "12:00",
        ];
        assert!(Harness::try_parse_from(argv).is_err());
    }
}
