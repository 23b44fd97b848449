use super::config::UpstreamConfig;
use super::errors::ConnectorError;
use crate::i18n::Locale;
use crate::models::ChatTurn;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

const MESSAGES_PATH: &str = "/v1/messages";

/// Body of a synchronous completion call, in the provider's request shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ChatTurn>,
}

impl CompletionRequest {
    /// Attach the fixed persona instruction and model settings to a caller-supplied history.
    pub fn new(config: &UpstreamConfig, locale: Locale, messages: Vec<ChatTurn>) -> Self {
        let system = config
            .system_prompt
            .clone()
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or_else(|| locale.system_prompt().to_string());

        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            system,
            messages,
        }
    }
}

#[async_trait]
pub trait CompletionConnector: Send + Sync {
    /// Returns the provider's successful response body untouched.
    async fn complete(&self, request: CompletionRequest) -> Result<Value, ConnectorError>;
}

pub struct AnthropicClient {
    endpoint: String,
    http_client: reqwest::Client,
    api_key: Option<String>,
    api_version: String,
    user_agent: String,
}

impl AnthropicClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ConnectorError> {
        let mut builder = reqwest::Client::builder();
        // 0 leaves the request unbounded, as the transport default does.
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder
            .build()
            .map_err(|err| ConnectorError::Internal(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), MESSAGES_PATH),
            http_client,
            api_key: config.api_key.clone(),
            api_version: config.api_version.clone(),
            user_agent: format!("openpolicy-proxy/{}", env!("CARGO_PKG_VERSION")),
        })
    }
}

#[async_trait]
impl CompletionConnector for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Value, ConnectorError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ConnectorError::MissingCredential("ANTHROPIC_API_KEY is not set".to_string())
        })?;

        let span = tracing::info_span!(
            "anthropic_http_request",
            model = %request.model,
            messages = request.messages.len(),
        );

        let resp = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .header("user-agent", &self.user_agent)
            .json(&request)
            .send()
            .instrument(span)
            .await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| ConnectorError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(ConnectorError::from_status(status, text));
        }

        serde_json::from_str::<Value>(&text).map_err(|_| ConnectorError::InvalidResponse(text))
    }
}

/// Initialize the upstream connector from app settings
pub fn init(config: &UpstreamConfig) -> Result<Arc<dyn CompletionConnector>, ConnectorError> {
    let connector: Arc<dyn CompletionConnector> = if config.enabled {
        if config.api_key.is_none() {
            tracing::error!(
                "ANTHROPIC_API_KEY is not set - every chat request will fail until it is configured"
            );
        }
        let client = AnthropicClient::new(config)?;
        tracing::info!(model = %config.model, "Upstream connector initialized ({})", config.base_url);
        Arc::new(client)
    } else {
        tracing::warn!("Upstream connector disabled - using canned demo responses");
        Arc::new(mock::CannedCompletionConnector::new(
            Duration::from_millis(config.demo_delay_ms),
        ))
    };

    Ok(connector)
}

pub mod mock {
    use super::*;
    use rand::seq::SliceRandom;
    use serde_json::json;

    pub const CANNED_RESPONSES: [&str; 3] = [
        r#"## 最新の政策動向について

政策動向の分析において、以下の点に注目することをお勧めします：

1. **デジタルトランスフォーメーション関連規制**
   - データプライバシー法の強化
   - AI規制フレームワークの策定

2. **環境・サステナビリティ政策**
   - カーボンニュートラル目標の設定
   - サプライチェーンデューデリジェンス

3. **経済安全保障**
   - 技術流出防止策
   - サプライチェーン強靭化

これらの分野で新しい規制や政策が次々と発表されています。具体的な分野についてさらに詳しく知りたい場合はお知らせください。"#,
        r#"## 規制対応のベストプラクティス

効果的な規制対応には、以下のアプローチが推奨されます：

### 1. 早期関与（Early Engagement）
規制の策定段階から積極的に意見を提出し、政策形成プロセスに参加することが重要です。

### 2. ステークホルダーマッピング
- 規制当局の担当者
- 業界団体
- 学識経験者
- NGO・市民社会

### 3. コンプライアンス体制の構築
```
・ 専任チームの設置
・ 定期的なリスクアセスメント
・ トレーニングプログラムの実施
```

### 4. モニタリングと報告
定期的な進捗報告と、問題発生時の迅速な対応体制を整えましょう。"#,
        r#"## ステークホルダーエンゲージメント戦略

効果的なステークホルダーエンゲージメントには、以下の要素が重要です：

### コミュニケーション戦略
| ステークホルダー | 頻度 | チャネル |
|---|---|---|
| 政府機関 | 月次 | 対面・書面 |
| 業界団体 | 週次 | 会議・メール |
| メディア | 随時 | プレスリリース |

### 関係構築のポイント

1. **透明性の確保**
   - 正確な情報提供
   - タイムリーな開示

2. **双方向コミュニケーション**
   - フィードバックの収集
   - 対話の機会創出

3. **長期的視点**
   - 信頼関係の構築
   - 継続的な関与

具体的なステークホルダーや課題についてご相談ください。"#,
    ];

    /// Demo connector: answers every request with one of the canned policy
    /// answers after a fixed delay. Never used when the upstream is enabled.
    pub struct CannedCompletionConnector {
        delay: Duration,
    }

    impl CannedCompletionConnector {
        pub fn new(delay: Duration) -> Self {
            Self { delay }
        }
    }

    impl Default for CannedCompletionConnector {
        fn default() -> Self {
            Self::new(Duration::ZERO)
        }
    }

    #[async_trait]
    impl CompletionConnector for CannedCompletionConnector {
        async fn complete(&self, request: CompletionRequest) -> Result<Value, ConnectorError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let text = CANNED_RESPONSES
                .choose(&mut rand::thread_rng())
                .copied()
                .unwrap_or_default();

            Ok(json!({
                "id": format!("msg_demo_{}", uuid::Uuid::new_v4().simple()),
                "type": "message",
                "role": "assistant",
                "model": request.model,
                "content": [{ "type": "text", "text": text }],
                "stop_reason": "end_turn",
            }))
        }
    }
}
