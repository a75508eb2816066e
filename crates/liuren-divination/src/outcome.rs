// SPDX-FileCopyrightText: 2026 Liuren Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fixed table of six Xiaoliuren outcomes.

use liuren_core::Outcome;

/// All outcomes, ordered by `index`.
pub static OUTCOMES: [Outcome; 6] = [
    Outcome {
        name: "大安",
        index: 0,
        meaning: "大吉大利，诸事顺遂",
        detail: "大安事事昌，求财在坤方，失物去不远，宅舍保平安。",
        result: "能成",
        color: "#4CAF50",
    },
    Outcome {
        name: "留连",
        index: 1,
        meaning: "事情拖延，难以速成",
        detail: "留连事难成，求谋日未明，官事只宜缓，去者未回程。",
        result: "拖延",
        color: "#FF9800",
    },
    Outcome {
        name: "速喜",
        index: 2,
        meaning: "快速有喜，好事将近",
        detail: "速喜喜来临，求财向南行，失物申未午，逢人路上寻。",
        result: "能成",
        color: "#2196F3",
    },
    Outcome {
        name: "赤口",
        index: 3,
        meaning: "口舌是非，需防小人",
        detail: "赤口主口舌，官非切要防，失物急去寻，行人有惊慌。",
        result: "难成",
        color: "#f44336",
    },
    Outcome {
        name: "小吉",
        index: 4,
        meaning: "小有吉利，平稳顺利",
        detail: "小吉最吉昌，路上好商量，阴人来报喜，失物在坤方。",
        result: "能成",
        color: "#8BC34A",
    },
    Outcome {
        name: "空亡",
        index: 5,
        meaning: "诸事不宜，徒劳无功",
        detail: "空亡事不祥，阴人多乖张，求财无利益，行人有灾殃。",
        result: "难成",
        color: "#9E9E9E",
    },
];
