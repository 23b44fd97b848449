use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language the deployment talks to its users in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Fixed user-facing strings. Raw technical errors never reach the user;
/// one of these is shown instead.
#[derive(Debug)]
pub struct Texts {
    pub exchange_failed: &'static str,
    pub upstream_failed: &'static str,
    pub sign_in_failed: &'static str,
    pub sign_up_failed: &'static str,
    pub fields_required: &'static str,
    pub invalid_email: &'static str,
    pub password_too_short: &'static str,
    pub password_too_long: &'static str,
    pub password_mismatch: &'static str,
    pub sign_up_sent: &'static str,
    pub welcome_title: &'static str,
    pub welcome_body: &'static str,
    pub input_placeholder: &'static str,
    pub disclaimer: &'static str,
    pub thinking: &'static str,
    pub auth_required: &'static str,
    pub sign_in_label: &'static str,
    pub sign_up_label: &'static str,
    pub quit_label: &'static str,
    pub email_label: &'static str,
    pub password_label: &'static str,
    pub confirm_password_label: &'static str,
    pub signed_out: &'static str,
    pub new_chat: &'static str,
    pub help: &'static str,
    pub starter_prompts: [&'static str; 3],
}

const JA: Texts = Texts {
    exchange_failed: "メッセージの送信に失敗しました。もう一度お試しください。",
    upstream_failed: "AI応答の取得に失敗しました",
    sign_in_failed: "メールアドレスまたはパスワードが正しくありません",
    sign_up_failed: "アカウント作成に失敗しました。別のメールアドレスをお試しください",
    fields_required: "すべてのフィールドを入力してください",
    invalid_email: "有効なメールアドレスを入力してください",
    password_too_short: "パスワードは6文字以上で入力してください",
    password_too_long: "パスワードが長すぎます",
    password_mismatch: "パスワードが一致しません",
    sign_up_sent: "確認メールを送信しました",
    welcome_title: "PA AIへようこそ",
    welcome_body: "政策分析、規制動向、パブリックアフェアーズに関する質問をお気軽にどうぞ。専門的な知見をもとにサポートいたします。",
    input_placeholder: "メッセージを入力してください...",
    disclaimer: "AIの回答は参考情報としてご利用ください",
    thinking: "回答を生成しています...",
    auth_required: "OpenPolicy PA AIにアクセスするには認証が必要です",
    sign_in_label: "ログイン",
    sign_up_label: "アカウント作成",
    quit_label: "終了",
    email_label: "メールアドレス",
    password_label: "パスワード",
    confirm_password_label: "パスワード（確認）",
    signed_out: "ログアウトしました",
    new_chat: "新しいチャットを開始しました",
    help: "/new 新しいチャット  /logout ログアウト  /quit 終了  (空行で質問例を表示)",
    starter_prompts: [
        "最新の政策動向について教えてください",
        "規制対応のベストプラクティスは？",
        "ステークホルダーエンゲージメントの戦略を教えてください",
    ],
};

const EN: Texts = Texts {
    exchange_failed: "Failed to send the message. Please try again.",
    upstream_failed: "Failed to get a response from the AI.",
    sign_in_failed: "The email address or password is incorrect.",
    sign_up_failed: "Could not create the account. Please try another email address.",
    fields_required: "Please fill in all fields.",
    invalid_email: "Please enter a valid email address.",
    password_too_short: "The password must be at least 6 characters.",
    password_too_long: "The password is too long.",
    password_mismatch: "The passwords do not match.",
    sign_up_sent: "A confirmation email has been sent.",
    welcome_title: "Welcome to PA AI",
    welcome_body: "Ask anything about policy analysis, regulatory trends or public affairs.",
    input_placeholder: "Type a message...",
    disclaimer: "AI answers are for reference only.",
    thinking: "Generating a response...",
    auth_required: "Sign in to access OpenPolicy PA AI",
    sign_in_label: "Sign in",
    sign_up_label: "Create account",
    quit_label: "Quit",
    email_label: "Email",
    password_label: "Password",
    confirm_password_label: "Confirm password",
    signed_out: "Signed out",
    new_chat: "Started a new chat",
    help: "/new new chat  /logout sign out  /quit exit  (empty line shows starter questions)",
    starter_prompts: [
        "What are the latest policy trends?",
        "What are best practices for regulatory compliance?",
        "How should we approach stakeholder engagement?",
    ],
};

const SYSTEM_PROMPT_JA: &str = "あなたはOpenPolicy PA AIです。日本のパブリックアフェアーズ（政策渉外）の専門家として、以下のサポートを提供します：

1. 政策・規制の調査と分析
2. ステークホルダーマッピング
3. PA戦略の立案支援
4. 政策動向のモニタリング

専門的でありながら、わかりやすい言葉で説明してください。日本語で回答してください。";

const SYSTEM_PROMPT_EN: &str = "You are OpenPolicy PA AI, a public affairs and regulatory-affairs advisor. You help with:

1. Researching and analysing policy and regulation
2. Stakeholder mapping
3. Public affairs strategy planning
4. Monitoring policy developments

Be professional yet easy to understand. Answer in English.";

impl Locale {
    pub fn texts(self) -> &'static Texts {
        match self {
            Self::Ja => &JA,
            Self::En => &EN,
        }
    }

    /// Persona instruction attached to every upstream completion request.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Self::Ja => SYSTEM_PROMPT_JA,
            Self::En => SYSTEM_PROMPT_EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ja => write!(f, "ja"),
            Self::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ja" | "jp" | "japanese" => Ok(Self::Ja),
            "en" | "english" => Ok(Self::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}
