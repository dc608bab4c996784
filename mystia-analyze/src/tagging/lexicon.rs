//! Scenario keyword lists
//!
//! Hand-curated per scenario. The loose lists are single characters tried
//! only when no full keyword matched.

use mystia_common::Scenario;

const EMOTIONAL_KEYWORDS: &[&str] = &[
    "复合", "分手", "恋爱", "喜欢", "前任", "暧昧", "桃花", "婚姻",
    "感情", "情感", "爱情", "对象", "恋人", "情侣", "相亲", "脱单",
    "追求", "表白", "暗恋", "单恋", "失恋", "挽回", "和好", "冷战",
    "吵架", "矛盾", "异地", "异地恋", "结婚", "离婚", "单身",
];

const ACADEMIC_KEYWORDS: &[&str] = &[
    "考试", "考研", "毕业", "论文", "复习", "四六级", "教资", "专四",
    "学习", "备考", "上岸", "录取", "成绩", "挂科", "补考", "重修",
    "期末", "期中", "作业", "课程", "专业", "选课", "选专业", "转专业",
    "保研", "出国", "留学", "语言", "英语", "托福", "雅思", "GRE",
    "学历", "学位", "证书", "资格证", "教师", "公务员", "事业单位",
];

const CAREER_KEYWORDS: &[&str] = &[
    "工作", "面试", "求职", "offer", "跳槽", "事业", "岗位",
    "职业", "就业", "应聘", "简历", "HR", "薪资", "工资", "薪水",
    "转正", "实习", "试用期", "离职", "辞职", "被辞", "裁员",
    "升职", "加薪", "同事", "领导", "老板", "团队", "项目",
    "创业", "公司", "企业", "行业", "职位", "招聘", "投递",
];

const DAILY_KEYWORDS: &[&str] = &[
    "水逆", "运势", "选择", "健康", "出行", "今天", "本周",
    "星座", "占卜", "塔罗", "星盘", "占星", "命理", "玄学",
    "预测", "分析", "建议", "指导", "咨询", "答疑", "解惑",
    "迷茫", "困惑", "焦虑", "压力", "烦恼", "纠结", "犹豫",
    "决定", "决策", "选择困难", "人生", "未来", "规划", "目标",
    "生活", "日常", "习惯", "改变", "改善", "提升", "成长",
];

const EMOTIONAL_LOOSE: &[&str] = &["爱", "情", "恋", "婚"];
const ACADEMIC_LOOSE: &[&str] = &["学", "考", "试", "书"];
const CAREER_LOOSE: &[&str] = &["工", "职", "业", "作"];
const DAILY_LOOSE: &[&str] = &["运", "势", "星", "占", "问", "题", "想", "要"];

/// Full keyword list of a scenario (empty for Other)
pub fn scene_keywords(scenario: Scenario) -> &'static [&'static str] {
    match scenario {
        Scenario::Emotional => EMOTIONAL_KEYWORDS,
        Scenario::Academic => ACADEMIC_KEYWORDS,
        Scenario::Career => CAREER_KEYWORDS,
        Scenario::Daily => DAILY_KEYWORDS,
        Scenario::Other => &[],
    }
}

/// Single-character fallback list of a scenario (empty for Other)
pub fn loose_keywords(scenario: Scenario) -> &'static [&'static str] {
    match scenario {
        Scenario::Emotional => EMOTIONAL_LOOSE,
        Scenario::Academic => ACADEMIC_LOOSE,
        Scenario::Career => CAREER_LOOSE,
        Scenario::Daily => DAILY_LOOSE,
        Scenario::Other => &[],
    }
}
