//! Built-in substitution triggers

use crate::domain::entities::{Category, SubstitutionTable};

const EMOJI: &[(&str, &str)] = &[
    ("smile", "🙂"),
    ("grin", "😁"),
    ("joy", "😂"),
    ("wink", "😉"),
    ("cry", "😢"),
    ("angry", "😠"),
    ("thinking", "🤔"),
    ("heart", "❤"),
    ("fire", "🔥"),
    ("ok", "👌"),
    ("+1", "👍"),
    ("-1", "👎"),
    ("clap", "👏"),
    ("eyes", "👀"),
    ("skull", "💀"),
    ("100", "💯"),
    ("tada", "🎉"),
    ("coffee", "☕"),
    ("beer", "🍺"),
    ("pizza", "🍕"),
];

const OTHER: &[(&str, &[&str])] = &[
    ("shrug", &["¯\\_(ツ)_/¯", "┐(´～｀)┌", "¯\\(°_o)/¯"]),
    ("tableflip", &["(╯°□°)╯︵ ┻━┻", "(ノಠ益ಠ)ノ彡┻━┻", "┻━┻ ︵ヽ(`Д´)ﾉ︵ ┻━┻"]),
    ("unflip", &["┬─┬ノ( º _ ºノ)", "┬──┬◡ﾉ(° -°ﾉ)"]),
    ("lenny", &["( ͡° ͜ʖ ͡°)", "( ͠° ͟ʖ ͡°)", "( ͡~ ͜ʖ ͡°)"]),
    ("disapprove", &["ಠ_ಠ", "ಠ~ಠ", "ಠ▃ಠ"]),
    ("dealwithit", &["(•_•) ( •_•)>⌐■-■ (⌐■_■)", "(⌐■_■)"]),
    ("gib", &["༼ つ ◕_◕ ༽つ", "(っ˘ڡ˘ς)"]),
];

const JMOTE: &[(&str, &[&str])] = &[
    ("happy", &["(＾▽＾)", "(◕‿◕)", "ヽ(´▽`)/", "(*^ω^)"]),
    ("sad", &["(╥﹏╥)", "(ಥ﹏ಥ)", "(´；ω；`)"]),
    ("love", &["(♥ω♥*)", "(´ ω `♡)", "(｡♥‿♥｡)"]),
    ("angry", &["(＃`Д´)", "(╬ Ò﹏Ó)", "ヽ(#`Д´)ﾉ"]),
    ("surprised", &["(⊙_⊙)", "(°ロ°)", "Σ(°△°|||)"]),
    ("sleepy", &["(－_－) zzZ", "(∪｡∪)｡｡｡zzz"]),
    ("bear", &["ʕ•ᴥ•ʔ", "ʕ·ᴥ·ʔ", "ʕ •̀ ω •́ ʔ"]),
    ("cat", &["(=^･ω･^=)", "ฅ^•ﻌ•^ฅ", "(^・ω・^ )"]),
    ("bow", &["m(_ _)m", "<(_ _)>"]),
];

/// Emoji first, then reaction faces, then Japanese emoticons
pub fn default_table() -> SubstitutionTable {
    let emoji = EMOJI
        .iter()
        .fold(Category::new("emoji"), |c, (token, text)| c.with_fixed(*token, *text));
    let other = OTHER
        .iter()
        .fold(Category::new("other"), |c, (token, texts)| c.with_choice(*token, texts.iter().copied()));
    let jmote = JMOTE
        .iter()
        .fold(Category::new("jmote"), |c, (token, texts)| c.with_choice(*token, texts.iter().copied()));

    SubstitutionTable::new()
        .with_category(emoji)
        .with_category(other)
        .with_category(jmote)
}
