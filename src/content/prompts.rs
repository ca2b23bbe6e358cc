// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt templates and sampling parameters for the model calls

/// Sampling parameters for the article rewrite call.
pub const REWRITE_TEMPERATURE: f32 = 0.7;
pub const REWRITE_MAX_TOKENS: u32 = 2000;

/// Sampling parameters for the social content call.
pub const SOCIAL_TEMPERATURE: f32 = 0.65;
pub const SOCIAL_MAX_TOKENS: u32 = 1000;

pub const REWRITE_SYSTEM_PROMPT: &str = "You are a professional K-pop news article writer. \
Format your responses in Markdown. NEVER add statements or quotes that are not in the original article.";

pub const SOCIAL_SYSTEM_PROMPT: &str =
    "You are a K-pop social media manager. Respond only with the requested JSON format.";

/// Build the user prompt for rewriting an article in K-pop news style.
pub fn build_rewrite_prompt(original_text: &str) -> String {
    format!(
        "You are a professional K-pop news article writer with extensive experience in writing for major K-pop news websites.
Rewrite the following article in an engaging and professional K-pop news style while maintaining accuracy and adding relevant context where appropriate.
Use a tone that appeals to K-pop fans while maintaining journalistic integrity.
Keep the writing style similar to popular K-pop news sites like Soompi, allkpop, or Koreaboo.

IMPORTANT RULES:
1. DO NOT add any quotes or statements that are not present in the original article
2. DO NOT make up or generate any statements from people
3. ONLY include quotes that are directly from the original article
4. If there are no statements or quotes in the original, do not add any
5. Stick strictly to the facts presented in the original article

Format your response in Markdown with:
- A catchy headline as an H1 (#)
- Proper paragraphs with line breaks
- Important quotes in blockquotes (>) ONLY if they exist in the original
- Emphasis on key points using bold or italic
- Lists where appropriate
- Artist/group names in bold

Original article to rewrite:
{original_text}

Important guidelines:
- Maintain factual accuracy
- Use K-pop industry standard terminology
- Include idol/group names consistently (in bold)
- Keep the tone engaging but professional
- Add relevant context when necessary
- Format with appropriate paragraphs and markdown
- Use present tense for news reporting
- NO fabricated quotes or statements"
    )
}

/// Build the user prompt for generating social media headlines and captions.
pub fn build_social_prompt(title: &str, text: &str) -> String {
    format!(
        r#"As an expert K-pop social media manager, create Instagram content for this article.

Article Title: {title}
Article Content: {text}

Create THREE headlines (max 80 chars) and THREE detailed captions following these guidelines:

Headline Guidelines:
- Keep headlines concise but impactful
- Focus on the key news or announcement
- Use engaging language that appeals to K-pop fans
- Maximum 80 characters per headline

Caption Guidelines:
- Write detailed, professional captions (200-300 words each)
- NO emojis - maintain professional tone
- First caption: Focus on news details and facts
- Second caption: Emphasize artist/group achievements and milestones
- Third caption: Create engagement through discussion points
- Include relevant hashtags at the end (max 5-6 hashtags)
- Use proper formatting with line breaks for readability
- Maintain journalistic integrity while appealing to fans
- Add context when necessary for international fans

Provide the content in this JSON format:
{{
    "headlines": [
        "First headline here",
        "Second headline here",
        "Third headline here"
    ],
    "captions": [
        "First caption focusing on detailed news coverage",
        "Second caption highlighting achievements and impact",
        "Third caption encouraging fan engagement and discussion"
    ]
}}"#
    )
}
