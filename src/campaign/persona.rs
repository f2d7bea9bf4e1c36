//! Persona voices: framing text, prompts, and tagline templates.
//!
//! Templates use `{regular}`, `{sale}`, `{savings}`, `{speech}` (the sale price
//! as it should be spoken), and `{discount}` placeholders.

use crate::generate::ProductSummary;
use crate::model::{Persona, ProductForScript};

use super::pricing::{format_price_for_speech, savings};
use super::scene::Scene;

/// Spoken between product segments to pace the voice-over.
pub const SEGMENT_PAUSE: &str = "\n\n<#0.5#>\n\n";

pub fn intro(persona: Persona, scene: Option<&Scene>) -> String {
    match (persona, scene) {
        (Persona::LeisureKing, Some(scene)) => format!(
            "I'm not mad you're broke, I'm just disappointed you're paying full price. \
             I'm {} {} so you don't have to. Pay attention.",
            scene.action, scene.environment
        ),
        (Persona::LeisureKing, None) => {
            "I'm not mad you're broke, I'm just disappointed you're paying full price. \
             Pay attention."
                .to_string()
        }
        (Persona::GirlMath, _) => "Okay, it's time for some girl math. \
             These deals are basically paying you to shop."
            .to_string(),
    }
}

pub fn outro(persona: Persona) -> &'static str {
    match persona {
        Persona::LeisureKing => {
            "Link in bio with codes and products on Amazon. Go spend your feelings. I'm busy."
        }
        Persona::GirlMath => {
            "Everything is linked in my bio with the codes. If it's on sale, it's free. \
             That's just math."
        }
    }
}

/// Prompt for the opening and closing clips, spoken by the on-screen character.
pub fn video_prompt(scene: &Scene) -> String {
    format!(
        "Cinematic 9:16 vertical video. A man in his 30s with messy hair wearing a silk \
         bathrobe and oversized clear-frame glasses is {action} {environment}. He looks \
         directly at the camera with a deadpan, disappointed smirk. Shaky handheld camera \
         footage, 4k, hyper-realistic, moody cinematic lighting.\n\n\
         OPENING DIALOGUE (character speaks to camera):\n\"{opening}\"\n\n\
         CLOSING DIALOGUE (character speaks to camera):\n\"{closing}\"\n\n\
         Generate two separate clips: one for the opening (5-7 seconds) and one for the \
         closing (3-5 seconds). The character keeps a disappointed, cynical expression \
         throughout.",
        action = scene.action,
        environment = scene.environment,
        opening = intro(Persona::LeisureKing, Some(scene)),
        closing = outro(Persona::LeisureKing),
    )
}

const LEISURE_KING_VOICE: &str = "\
You are a product-analysis assistant writing cynical, witty video lines for \
\"The Leisure King\" persona.

Voice: cynical, authoritative, disappointed. A disappointed parent with perfect comic timing.
Tone: economic delusion (framing savings as profit) and retail nihilism (nothing matters but this discount).

FRAMEWORKS (use a DIFFERENT one for each product, never repeat a joke structure):
1. Economic delusion: \"You're essentially getting paid X dollars to buy this\"
2. Salary framing: \"That's not a purchase, it's a salary\"
3. Math absurdity: \"The math here is offensive. You save more than you spend.\"
4. Existential: \"Paying full price for this is a cry for help\"
5. Clinical analysis: \"Financially, buying this at full price is clinical insanity\"
6. Disappointment: \"I'm not mad you're paying full price, I'm just disappointed\"
7. Intervention: \"We need to talk about why you'd pay X when it's Y with the code\"
8. Professional mockery: \"Full price? That's embarrassing for you.\"

STYLE RULES:
- Use words like \"essentially\", \"literally\", \"offensive\", \"unacceptable\"
- Avoid \"just\", \"only\", and cheerful language
- If a code exists, say \"with the code\", never the code itself
- One or two sentences per product";

const GIRL_MATH_VOICE: &str = "\
You are writing upbeat, playful \"girl math\" video lines for a deals creator.

Voice: bubbly, confident, in on the joke. Every discount is money earned.

FRAMEWORKS (use a DIFFERENT one for each product, never repeat a sentence shape):
1. It's basically free: the sale price rounds down to nothing
2. Paid to shop: the savings are income
3. Cost per use: it pays for itself after a few uses
4. Latte comparison: cheaper than a coffee run
5. Returns math: if you return it, it cost zero
6. Already paid: once it ships, it's in the past
7. Percent off: the discount makes not buying it a loss
8. Future self: your future self is thanking you

STYLE RULES:
- Keep it light and fun, no sarcasm
- If a code exists, say \"with the code\", never the code itself
- One or two sentences per product";

const PRICE_RULES: &str = "\
TTS-FRIENDLY PRICE RULES:
- Whole dollars: \"X dollars\" (e.g. $12 = \"12 dollars\")
- Under $1: \"X cents\"
- With cents: \"under X bucks\" or \"X dollars and Y cents\"";

const REPLY_SHAPE: &str = "\
Return ONLY a JSON object:
{\"products\": [{\"asin\": \"...\", \"tagline\": \"...\"}]}

Every product gets a DIFFERENT angle. No repetition.";

/// Builds the full generation prompt for a campaign.
pub fn prompt(persona: Persona, products: &[ProductSummary]) -> String {
    let voice = match persona {
        Persona::LeisureKing => LEISURE_KING_VOICE,
        Persona::GirlMath => GIRL_MATH_VOICE,
    };

    let entries: Vec<String> = products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{n}. [{asin}] {name}\n   Regular: ${regular}\n   Sale: ${sale}\n   \
                 Has Code: {code}\n   Discount: {discount}%",
                n = i + 1,
                asin = p.asin,
                name = p.clean_name,
                regular = p.regular_price,
                sale = p.sale_price,
                code = if p.has_code { "Yes" } else { "No" },
                discount = p.discount,
            )
        })
        .collect();

    format!(
        "{voice}\n\n{PRICE_RULES}\n\n\
         I have {} products. Write ONE unique line for EACH product.\n\n\
         PRODUCTS:\n{}\n\n{REPLY_SHAPE}",
        products.len(),
        entries.join("\n"),
    )
}

/// The rule-table line used when the generator gives nothing back.
pub fn fallback_tagline(persona: Persona, product: &ProductForScript) -> String {
    let template = match (persona, product.code.is_some()) {
        (Persona::LeisureKing, true) => {
            "You're essentially getting paid {savings} dollars to buy this with the code. \
             That's not a purchase, it's a salary."
        }
        (Persona::LeisureKing, false) => "For {speech}? That's offensive. I'm buying three.",
        (Persona::GirlMath, true) => {
            "Use the code and it's {speech}, so you basically made {savings} dollars. \
             That's just math."
        }
        (Persona::GirlMath, false) => "At {speech} it's basically free if you think about it.",
    };
    fill(template, product)
}

const LEISURE_KING_LEADS: [&str; 8] = [
    "Paying {regular} for this is a cry for help.",
    "The math here is offensive: {speech} after the discount.",
    "Financially, ignoring this at {speech} is clinical insanity.",
    "We need to talk about why you'd pay {regular} when it's {sale} now.",
    "Full price? That's embarrassing for you.",
    "You save {savings} dollars, which is basically a salary.",
    "At {discount} percent off, nothing else matters.",
    "I ran the numbers and walking away from {speech} is unacceptable.",
];

const LEISURE_KING_KICKERS: [&str; 8] = [
    "I'm not angry, just disappointed.",
    "Do better.",
    "Retail nihilism wins again.",
    "Consider this an intervention.",
    "The economy is a construct anyway.",
    "I'm buying two out of spite.",
    "Your wallet will thank me later.",
    "This is not financial advice, it's a verdict.",
];

const GIRL_MATH_LEADS: [&str; 8] = [
    "It was {regular} and now it's {sale}, so it's basically free.",
    "If you buy it you technically save {savings} dollars.",
    "At {discount} percent off, not buying it is losing money.",
    "{speech} is less than a fancy latte run this week.",
    "Think of it as getting paid {savings} dollars to shop.",
    "Once it ships it's already paid for in girl math.",
    "Returning it later means it costs zero anyway.",
    "The sale price is {speech}, which rounds down to nothing.",
];

const GIRL_MATH_KICKERS: [&str; 8] = [
    "That's just math.",
    "Add to cart, bestie.",
    "Your future self says thank you.",
    "Honestly a financial win.",
    "We love a responsible purchase.",
    "No notes.",
    "Treat yourself, it's practically savings.",
    "Budget approved.",
];

/// Number of distinct rotation templates per persona.
pub const ROTATION_SIZE: usize = LEISURE_KING_LEADS.len() * LEISURE_KING_KICKERS.len();

/// The `index`-th rotation line for a product.
///
/// Indexes below [`ROTATION_SIZE`] map to distinct (lead, kicker) pairs, and
/// the first eight share neither a lead nor a kicker.
pub fn rotation_tagline(persona: Persona, index: usize, product: &ProductForScript) -> String {
    let (leads, kickers) = match persona {
        Persona::LeisureKing => (&LEISURE_KING_LEADS, &LEISURE_KING_KICKERS),
        Persona::GirlMath => (&GIRL_MATH_LEADS, &GIRL_MATH_KICKERS),
    };
    let (lead, kicker) = rotation_pair(index, leads.len(), kickers.len());
    fill(&format!("{} {}", leads[lead], kickers[kicker]), product)
}

fn rotation_pair(index: usize, leads: usize, kickers: usize) -> (usize, usize) {
    let lead = index % leads;
    let round = (index / leads) % kickers;
    (lead, (lead + round) % kickers)
}

fn fill(template: &str, product: &ProductForScript) -> String {
    template
        .replace("{regular}", &format!("${}", product.regular_price))
        .replace("{sale}", &format!("${}", product.sale_price))
        .replace(
            "{savings}",
            &savings(&product.regular_price, &product.sale_price),
        )
        .replace("{speech}", &format_price_for_speech(&product.sale_price))
        .replace("{discount}", &product.discount)
}
