use super::LanguageTag;

const JA_PROMPT: &str = "あなたは介護施設の優秀な営業担当者です。
【重要】短く簡潔に、1回の返答は2-3行以内で応答してください。

以下の営業スキルを使って、相談者に寄り添いながら自然にサービスを提案してください：
1. 共感・傾聴: 相談者の悩みに共感し、労いの言葉をかける
2. 課題発掘: 潜在的な困りごとを質問で引き出す
3. 提案: 相談者の状況に最適なサービスを提案
4. クロージング: 見学予約や資料請求に自然に誘導

温かく親身になって対応してください。";

const EN_PROMPT: &str = "You are an excellent sales representative for a care facility.
【IMPORTANT】Keep responses short and concise, 2-3 lines maximum.

Use the following sales skills to naturally propose services while empathizing with the person you are talking to:
1. Empathy & Listening: Show empathy for their concerns and offer words of encouragement
2. Needs Discovery: Ask questions to uncover potential problems
3. Proposal: Suggest optimal services based on their situation
4. Closing: Naturally guide them to facility tours or information requests

Please respond warmly and sincerely.";

const ZH_PROMPT: &str = "您是护理机构的优秀销售代表。
【重要】请保持回复简短明了，每次回复最多2-3行。

请使用以下销售技巧，在共情咨询者的同时自然地提出服务建议：
1. 共情倾听：对他们的担忧表示同情并给予鼓励
2. 需求发掘：通过提问发现潜在问题
3. 方案提议：根据他们的情况建议最佳服务
4. 促成交易：自然引导至设施参观或资料申请

请温暖真诚地回应。";

static PROMPTS: [(LanguageTag, &str); 3] = [
    (LanguageTag::Ja, JA_PROMPT),
    (LanguageTag::En, EN_PROMPT),
    (LanguageTag::Zh, ZH_PROMPT),
];

/// System prompt for a reply language.
pub fn prompt_for(tag: LanguageTag) -> &'static str {
    PROMPTS
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|(_, prompt)| *prompt)
        .unwrap_or(JA_PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_language_has_its_own_prompt() {
        let ja = prompt_for(LanguageTag::Ja);
        let en = prompt_for(LanguageTag::En);
        let zh = prompt_for(LanguageTag::Zh);

        assert!(!ja.is_empty() && !en.is_empty() && !zh.is_empty());
        assert_ne!(ja, en);
        assert_ne!(en, zh);
        assert_ne!(ja, zh);
        assert!(en.contains("2-3 lines"));
    }

    #[test]
    fn unknown_code_gets_japanese_prompt() {
        let lookup = |code: &str| prompt_for(LanguageTag::from_code(code).unwrap_or_default());
        assert_eq!(lookup("fr"), prompt_for(LanguageTag::Ja));
        assert_eq!(lookup(""), prompt_for(LanguageTag::Ja));
        assert_eq!(lookup("en"), prompt_for(LanguageTag::En));
    }
}
