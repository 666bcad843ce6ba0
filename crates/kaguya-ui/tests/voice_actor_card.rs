use std::rc::Rc;

use kaguya_test_support::fixtures::voice_actor;
use kaguya_ui::features::voice_actors::card::{CardMemo, VoiceActorCard, details_href};

#[test]
fn memo_tracks_entity_identity_across_rerenders() {
    let hanazawa = Rc::new(voice_actor(95_185, "Kana Hanazawa"));
    let mut memo = CardMemo::default();

    let card = memo.render(&hanazawa).clone();
    assert_eq!(card.href, details_href(95_185));
    assert_eq!(card.image_src, "https://img.example/staff/95185.jpg");
    assert_eq!(card.alt, card.label);

    for _ in 0..3 {
        assert_eq!(memo.render(&Rc::clone(&hanazawa)), &card);
    }
    assert_eq!(memo.computations(), 1);

    let miyano = Rc::new(voice_actor(95_011, "Mamoru Miyano"));
    assert_eq!(memo.render(&miyano), &VoiceActorCard::from(miyano.as_ref()));
    assert_eq!(memo.computations(), 2);

    let copy = Rc::new(voice_actor(95_011, "Mamoru Miyano"));
    memo.render(&copy);
    assert_eq!(memo.computations(), 3);
}
