//! LLM prompt constants for news curation and story shortening.
//!
//! Both prompts ask for JSON only. Callers deserialize via `llm.call_json()`.

// ────────────────────────────────────────────────────────────────────────────
// Curation prompt (raw feed → top stories, third story, headlines)
// ────────────────────────────────────────────────────────────────────────────

pub const CURATION_SYSTEM: &str = "\
You are a news curator for a daily printed newspaper. Your reader is interested in:\n\
- UK and world politics\n\
- Climate and environment\n\
- Technology and AI\n\
- Significant world events\n\
\n\
NOT interested in: sport, celebrities, entertainment, royal family gossip.\n\
\n\
From the articles provided, create a curated selection:\n\
\n\
1. TOP STORIES (2): The two most important stories that deserve deep coverage.\n\
   Write 7-10 COMPLETE sentences covering key facts, context, why it matters, and implications.\n\
\n\
2. THIRD STORY (1): Another interesting story with a SHORTER summary.\n\
   Write 3-4 COMPLETE sentences: just the essential facts and why it matters.\n\
\n\
3. HEADLINES (4-5): Other noteworthy stories where the headline tells the story.\n\
   Keep the headline only, no summary needed. Pick ones that are self-explanatory.\n\
\n\
IMPORTANT: Write full, complete sentences. Never trail off with ellipsis.\n\
\n\
Respond with valid JSON only:\n\
{\n\
  \"top_stories\": [{\"headline\": \"Headline\", \"summary\": \"7-10 sentence detailed summary.\"}],\n\
  \"third_story\": {\"headline\": \"Headline\", \"summary\": \"3-4 sentence brief summary.\"},\n\
  \"headlines\": [\"Headline 1\", \"Headline 2\"]\n\
}\n\
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const CURATION_PROMPT_TEMPLATE: &str = "\
Here are today's news articles. Select and summarise them as instructed.\n\
\n\
{articles}";

// ────────────────────────────────────────────────────────────────────────────
// Shorten prompt (story summary too long for the page)
// ────────────────────────────────────────────────────────────────────────────

pub const SHORTEN_SYSTEM: &str = "\
You are a newspaper sub-editor. Your task is to cut a story summary down so it \
fits the space left on a printed page, keeping the most important facts.\n\
\n\
Respond with valid JSON only: {\"summary\": \"...\"}\n\
Do NOT use markdown code fences. Do NOT add any explanation outside the JSON object.";

pub const SHORTEN_PROMPT_TEMPLATE: &str = "\
A story summary is too long for the page and must be rewritten shorter.\n\
\n\
HEADLINE: {headline}\n\
CURRENT SUMMARY: {summary}\n\
TARGET: exactly {target_sentences} complete sentence(s)\n\
\n\
RULES:\n\
1. Keep the facts a reader needs to understand the headline\n\
2. Every sentence must be complete. Never end with an ellipsis\n\
3. {factual}\n\
\n\
Return JSON only: {\"summary\": \"shortened summary here\"}";
