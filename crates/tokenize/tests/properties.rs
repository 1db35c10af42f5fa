use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use subchar_tokenize::{
    CharTable, EncodeOptions, Encoded, GraphemicTokenizer, PhoneticTokenizer, PinyinRomanizer, ReturnFormat, Romanizer,
    SpecialTokens, SubcharTokenizer, TokenizerConfig, ToneSyllables,
};

const POOL: &[char] = &['中', '国', '你', '好', '大', '口', '木', '得', '。', ',', 'a', '7', ' ', '龘'];

fn random_text(rng: &mut ChaCha8Rng) -> String {
    let len = rng.gen_range(0..24);
    (0..len).map(|_| POOL[rng.gen_range(0..POOL.len())]).collect()
}

fn graphemic() -> GraphemicTokenizer {
    GraphemicTokenizer::new(&TokenizerConfig::graphemic().with_max_length(16))
}

fn phonetic() -> PhoneticTokenizer {
    PhoneticTokenizer::new(&TokenizerConfig::phonetic().with_max_length(16))
}

#[test]
fn bundled_tables_encode_chinese_text() {
    let tok = phonetic();
    let parts = tok.split_syllable("zhong1");
    assert_eq!((parts.initial, parts.final_part, parts.tone), (Some("zh"), Some("ong"), "1"));

    let v = tok.vocab();
    let ids = tok.encode("中国").ids;
    assert_eq!(ids.len(), 2 + 3 * 2);
    assert_eq!(&ids[1..4], &[v.lookup("zh"), v.lookup("ong"), v.lookup("1")]);
}

#[test]
fn bundled_syllable_table_backs_table_romanization() {
    let tok = PhoneticTokenizer::from_table(&TokenizerConfig::phonetic());
    let v = tok.vocab();
    let ids = tok.encode("中国").ids;
    assert_eq!(&ids[1..4], &[v.lookup("zh"), v.lookup("ong"), v.lookup("1")]);
    assert_eq!(ids, phonetic().encode("中国").ids);
}

#[test]
fn phonetic_punctuation_only_falls_back_to_unk() {
    let tok = phonetic();
    assert_eq!(tok.encode("。！？").ids, vec![2, 1, 3]);
    assert_eq!(tok.encode("").ids, vec![2, 1, 3]);
}

#[test]
fn encoding_is_deterministic() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let g = graphemic();
    let p = phonetic();
    for _ in 0..200 {
        let text = random_text(&mut rng);
        assert_eq!(g.encode(&text), g.encode(&text));
        assert_eq!(p.encode(&text), p.encode(&text));
    }
}

#[test]
fn phonetic_length_is_two_plus_three_k() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let p = phonetic();
    let romanizer = PinyinRomanizer::new();
    for _ in 0..200 {
        let text = random_text(&mut rng);
        let k = romanizer.romanize(&text).iter().filter(|e| !e.trim().is_empty()).count();
        let expected = if k == 0 { 3 } else { 2 + 3 * k };
        assert_eq!(p.encode(&text).len(), expected, "text {text:?}");
    }
}

#[test]
fn graphemic_mask_counts_real_tokens() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let g = graphemic();
    let options = EncodeOptions::pad_to_max_length();
    for _ in 0..200 {
        let text = random_text(&mut rng);
        let wrapped = g.encode(&text).len();
        let batch = g.apply(&[text.as_str()], &options);
        let real: usize = batch.attention_mask[0].iter().map(|&m| m as usize).sum();
        assert_eq!(real, wrapped.min(16));
        assert_eq!(batch.input_ids[0].len(), 16);
    }
}

#[test]
fn truncation_at_max_length_plus_one_drops_sep() {
    let g = graphemic();
    // 中 has 4 strokes, 口 has 3 => 7 ids, wrapped 9
    let options = EncodeOptions::pad_to_max_length().with_max_length(8);
    assert_eq!(g.encode("中口").len(), 9);
    let batch = g.apply(&["中口"], &options);
    let row = &batch.input_ids[0];
    assert_eq!(row.len(), 8);
    assert_eq!(row[..], g.encode("中口").ids[..8]);
    assert!(!row.contains(&g.specials().sep_id()));
    assert_eq!(batch.attention_mask[0], vec![1; 8]);
}

#[test]
fn phonetic_truncation_may_split_a_syllable() {
    let p = PhoneticTokenizer::with_romanizer(&TokenizerConfig::phonetic(), ToneSyllables::new().unwrap());
    let options = EncodeOptions::pad_to_max_length().with_max_length(6);
    let batch = p.apply(&["ni3 hao3"], &options);
    // the tone of hao3 and SEP fall past the limit
    let v = p.vocab();
    assert_eq!(
        batch.input_ids[0],
        vec![2, v.lookup("n"), v.lookup("i"), v.lookup("3"), v.lookup("h"), v.lookup("ao")]
    );
}

#[test]
fn missing_table_maps_everything_to_unk() {
    let cfg = TokenizerConfig::graphemic().with_table_path("/no/such/dir/zh2letter.txt");
    let g = GraphemicTokenizer::new(&cfg);
    assert_eq!(g.table_len(), 0);
    assert_eq!(g.vocab_size(), 4);
    assert_eq!(g.encode("中国!").ids, vec![2, 1, 1, 1, 3]);
}

#[test]
fn graphemic_vocabularies_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    graphemic().save_vocab(&a).unwrap();
    graphemic().save_vocab(&b).unwrap();
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
}

#[test]
fn phonetic_vocab_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pinyin_vocab.json");
    let p = phonetic();
    p.save_vocab(&path).unwrap();
    let loaded = subchar_tokenize::Vocabulary::load(&path).unwrap();
    assert_eq!(&loaded, p.vocab());
    for (id, symbol) in p.vocab().iter() {
        assert_eq!(p.vocab().reverse(p.vocab().lookup(symbol)), Some(symbol));
        assert_eq!(loaded.lookup(symbol), id);
    }
}

#[test]
fn same_options_work_for_both_schemes() {
    let schemes: Vec<Box<dyn SubcharTokenizer>> = vec![Box::new(graphemic()), Box::new(phonetic())];
    let options = EncodeOptions::pad_to_longest().with_return_format(ReturnFormat::Array);
    for tok in &schemes {
        match tok.call(vec!["中", "你好"].into(), &options).unwrap() {
            Encoded::Array(array) => {
                assert_eq!(array.shape[0], 2);
                assert_eq!(array.input_ids.len(), array.shape[0] * array.shape[1]);
            }
            Encoded::Raw(_) => panic!("expected array output"),
        }
    }
}

#[test]
fn custom_specials_keep_reserved_ids() {
    let specials = SpecialTokens {
        pad: "<pad>".into(),
        unk: "<unk>".into(),
        cls: "<s>".into(),
        sep: "</s>".into(),
    };
    let g = GraphemicTokenizer::from_table(&TokenizerConfig::graphemic(), CharTable::parse("一 H\n"), specials);
    assert_eq!(g.vocab().lookup("<s>"), 2);
    assert_eq!(g.decode(&g.encode("一?").ids), vec!["<s>", "H", "<unk>", "</s>"]);
}

proptest! {
    #[test]
    fn graphemic_never_fails(text in "\\PC{0,40}", max_length in 2usize..64) {
        let g = graphemic();
        let options = EncodeOptions::pad_to_max_length().with_max_length(max_length);
        let batch = g.apply(&[text.as_str()], &options);
        let wrapped = g.encode(&text).len();
        prop_assert!(wrapped >= text.chars().count() + 2);
        let real: usize = batch.attention_mask[0].iter().map(|&m| m as usize).sum();
        prop_assert_eq!(real, wrapped.min(max_length));
    }

    #[test]
    fn toned_syllables_emit_three_ids_each(syllables in proptest::collection::vec("[a-z]{1,5}[1-5]", 0..10)) {
        let p = PhoneticTokenizer::with_romanizer(&TokenizerConfig::phonetic(), ToneSyllables::new().unwrap());
        let text = syllables.join(" ");
        let expected = if syllables.is_empty() { 3 } else { 2 + 3 * syllables.len() };
        prop_assert_eq!(p.encode(&text).len(), expected);
    }
}
