//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 抽出対象のワークシートを1つ選択する方法を指定します。
/// 指定したシートが見つからない場合はエラーにせず、先頭シートにフォールバックします。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭シート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定（完全一致）
    ///
    /// 例: `SheetSelector::Name("Sheet1".to_string())`
    Name(String),

    /// HTTPフォームの`sheet`フィールドなど、利用者が入力した文字列
    ///
    /// 次の順で解釈します。
    ///
    /// 1. 空文字列なら先頭シート
    /// 2. 整数として解釈できる場合、`0 <= i < シート数`なら0始まりのインデックス、
    ///    そうでなく`1 <= i <= シート数`なら1始まりのインデックス
    /// 3. 整数でなければシート名
    ///
    /// 数字だけのシート名（例: "2024"）は整数として解釈されるため、名前では選べません。
    Request(String),
}

/// 出力フォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputFormat {
    /// 非空セルを1行1セルで列挙するTSV（デフォルト）
    ///
    /// LLMに渡しやすいよう、空セルは出力しません。
    ///
    /// ```text
    /// A1	氏名：
    /// B1	山田太郎
    /// A2	資格
    /// ```
    #[default]
    Tsv,

    /// セル一覧と推定したキー・バリューのペアを含むJSON
    ///
    /// ```json
    /// {
    ///   "sheet": "Sheet1",
    ///   "truncated": false,
    ///   "cells": [{"row": 1, "col": 1, "value": "氏名："}],
    ///   "pairs": [{"key": "氏名", "value": "山田太郎", "confidence": 0.95}]
    /// }
    /// ```
    Json,
}
