//! Results screen copy. The screen itself belongs to the presentation layer;
//! only the line selection lives here so it stays deterministic.

use serde::Serialize;

use crate::constants::{COMPLIMENTS_PER_TITLE, DEBRIEF_BUCKET_WIDTH, DEBRIEF_SCORE_CAP};
use crate::rng::SeededRng;

/// Indexed by `min(score, 189) / 21`.
pub const TITLES: [&str; 10] = [
    "REALLY?!",
    "MEH...",
    "COME ON!",
    "NOT BAD",
    "DECENT",
    "COMMENDABLE",
    "WATCH OUT!",
    "HIGH-FIVE!",
    "INCREDIBLE!",
    "WOWZA!",
];

/// Five lines per title, title `t` owns `t*5..t*5+5`.
pub const COMPLIMENTS: [&str; 50] = [
    // REALLY?!
    "HOW DID YOU MANAGE THAT?",
    "IT'S IMPOSSIBLE TO BE THIS BAD...",
    "REMEMBER: HIGHER SCORE IS BETTER",
    "WERE YOU RAISED IN A BARN?",
    "I'VE GOT A BAD FEELING ABOUT THIS",
    // MEH...
    "NEED MORE PRACTICE, FO SHO",
    "GOTTA BRUSH UP ON YOUR SKILLS",
    "WHERE'D YOU LEARN TO PLAY? A TOUCHSCREEN?",
    "YOU DISAPPOINT ME",
    "WHAT'S THE DEAL?",
    // COME ON!
    "INDIANA JONES WAS BETTER WITH SNAKES THAN YOU",
    "DO I HAVE TO PRESS THE BUTTONS MYSELF?",
    "YOU USED TO BELIEVE. WHAT HAPPENED?",
    "IT'S LIKE YOU'RE NOT EVEN TRYING",
    "THERE IS NO EXCUSE FOR BEING THIS BAD",
    // NOT BAD
    "KEEP PRACTICING, AND YOUR DAY JOB",
    "SOON, YOU'LL BE READY FOR THE BIG LEAGUES",
    "YOU CAN ALMOST PASS FOR A GAMER, ALMOST",
    "ANOTHER! ANOTHER!",
    "YOU CAN DO BETTER THAN THAT!",
    // DECENT
    "LOOKS LIKE YOU'RE GETTING THE HANG OF THINGS",
    "I'M SURPRISED YOU MADE IT THIS FAR",
    "ARE YOU JUST PLAYING TO READ THIS?",
    "DON'T GIVE UP ON ME NOW!",
    "DON'T LET THE MUGGLES GET YOU DOWN",
    // COMMENDABLE
    "YOU CANNOT EXPECT VICTORY PLAYING LIKE THAT",
    "THANKFULLY, PERSISTENCE IS A GREAT SUBSTITUTE FOR TALENT",
    "ONE MORE GAME...YOLO",
    "EVERY FAILURE BRINGS YOU CLOSER TO SUCCESS",
    "BELIEVE YOU CAN AND YOU'RE HALFWAY THERE",
    // WATCH OUT!
    "MY MY, AREN'T YOU A (SNAKE) CHARMER?",
    "WHERE DID YOU LEARN TO PLAY LIKE THAT?",
    "THERE ARE NO TRAFFIC JAMS ALONG THE EXTRA MILE",
    "NICE ONE, SPORT!",
    "GOOD BUT NOT GREAT",
    // HIGH-FIVE!
    "LOOK OUT FOLKS, THIS KID'S GOT TALENT!",
    "HOT STUFF COMING THROUGH!",
    "THERE'S A FUTURE FOR YOU!",
    "HOW LONG YOU BEEN PLAYING?",
    "TRY NOT. DO, OR DO NOT. THERE IS NO TRY",
    // INCREDIBLE!
    "HOLY SMOKES!",
    "TAKE A PICTURE! QUICK!",
    "BETTER CALL YOUR MOM AND SAY 'I TOLD YOU SO'",
    "DO YOU DO THIS ALL DAY?!",
    "JUST HOW ARE YOU THIS GOOD?!",
    // WOWZA!
    "YOU HAVE ARRIVED",
    "YOU NEED NOT PLAY ANY MORE",
    "YOU'VE UNLOCKED THE TIME MACHINE. WHEN TO?",
    "THE BEST REVENGE IS MASSIVE SUCCESS",
    "FANTASTIC!",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Debrief {
    pub score: u32,
    pub title: &'static str,
    pub compliment: &'static str,
}

#[inline]
pub fn title_index(score: u32) -> usize {
    (score.min(DEBRIEF_SCORE_CAP) / DEBRIEF_BUCKET_WIDTH) as usize
}

impl Debrief {
    pub fn for_score(score: u32, rng: &mut SeededRng) -> Self {
        let title = title_index(score);
        let compliment = title * COMPLIMENTS_PER_TITLE + rng.next_index(COMPLIMENTS_PER_TITLE);
        Self {
            score,
            title: TITLES[title],
            compliment: COMPLIMENTS[compliment],
        }
    }
}
